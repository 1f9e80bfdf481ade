use clap::Parser;
use pacekeeper::{
    audio::{AudioDevice, TerminalBell},
    cli::{run_calculator, session_finished, Args, Command},
    config::Settings,
    logging,
    metronome::MetronomeScheduler,
    ui::{cadence_message, create_cadence_spinner, create_session_progress},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::{thread, time::Duration, time::Instant};

const REFRESH: Duration = Duration::from_millis(100);

fn main() {
    let args = Args::parse();
    let settings = load_settings(&args);
    initialize_logging(&settings);

    match &args.command {
        Command::Metronome {
            bpm,
            seconds,
            device,
            choose_device,
            bell,
        } => {
            let bpm = bpm.unwrap_or(settings.metronome.default_bpm);
            let device = match open_device(&settings, device.clone(), *choose_device, *bell) {
                Ok(device) => device,
                Err(msg) => fail(&msg, 1),
            };
            run_metronome(&settings, device, bpm, *seconds);
        }
        Command::Devices => list_devices(),
        calculator => match run_calculator(calculator) {
            Some(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            None => fail("no result: every input must be a positive number", 2),
        },
    }
}

fn load_settings(args: &Args) -> Settings {
    match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn initialize_logging(settings: &Settings) {
    if let Err(e) = logging::init_logger(settings.log.level_filter()) {
        eprintln!("Logging disabled: {}", e);
    }
    log::info!("Application starting");
}

fn fail(msg: &str, code: i32) -> ! {
    log::error!("{}", msg);
    eprintln!("{}", msg);
    std::process::exit(code);
}

fn run_metronome(settings: &Settings, device: Box<dyn AudioDevice>, bpm: u32, seconds: Option<u64>) {
    let timing = match settings.metronome.look_ahead() {
        Ok(timing) => timing,
        Err(e) => fail(&e.to_string(), 1),
    };
    let scheduler = MetronomeScheduler::with_timing(device, timing);
    if let Err(e) = scheduler.start(bpm) {
        fail(&format!("Could not start metronome: {}", e), 1);
    }

    // Ctrl-C ends the session through teardown
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    let spinner = match seconds {
        Some(seconds) => create_session_progress(seconds),
        None => create_cadence_spinner(),
    };
    let started = Instant::now();
    loop {
        thread::sleep(REFRESH);
        let elapsed = started.elapsed();
        spinner.set_message(cadence_message(scheduler.bpm(), scheduler.pulses_scheduled()));
        if session_finished(elapsed, seconds, &interrupted) {
            break;
        }
        match seconds {
            Some(_) => spinner.set_position(elapsed.as_secs()),
            None => spinner.tick(),
        }
    }

    scheduler.teardown();
    spinner.finish_with_message(cadence_message(bpm, scheduler.pulses_scheduled()));
    log::info!("Metronome session finished");
}

#[cfg(feature = "midi")]
fn open_device(
    settings: &Settings,
    device: Option<String>,
    choose_device: bool,
    bell: bool,
) -> Result<Box<dyn AudioDevice>, String> {
    use pacekeeper::audio::{list_output_ports, MidiClick};
    use pacekeeper::cli::validate_device;

    if bell {
        return Ok(Box::new(TerminalBell::new()));
    }

    let mut click = settings.midi.click_settings();
    if choose_device {
        let ports = list_output_ports().map_err(|e| e.to_string())?;
        if ports.is_empty() {
            return Err("No MIDI output devices found".to_string());
        }
        let index = dialoguer::Select::new()
            .with_prompt("MIDI output")
            .items(&ports)
            .default(0)
            .interact()
            .map_err(|e| e.to_string())?;
        click.device = Some(ports[index].clone());
    } else if let Some(name) = device {
        let ports = list_output_ports().map_err(|e| e.to_string())?;
        validate_device(&name, &ports)?;
        click.device = Some(name);
    }

    Ok(Box::new(MidiClick::new(click)))
}

#[cfg(not(feature = "midi"))]
fn open_device(
    _settings: &Settings,
    device: Option<String>,
    choose_device: bool,
    _bell: bool,
) -> Result<Box<dyn AudioDevice>, String> {
    if device.is_some() || choose_device {
        log::warn!("Built without MIDI support, using the terminal bell");
    }
    Ok(Box::new(TerminalBell::new()))
}

#[cfg(feature = "midi")]
fn list_devices() {
    match pacekeeper::audio::list_output_ports() {
        Ok(devices) => {
            println!("Available MIDI output devices:");
            for device in devices {
                println!("  - {}", device);
            }
        }
        Err(e) => fail(&format!("Could not list MIDI devices: {}", e), 1),
    }
}

#[cfg(not(feature = "midi"))]
fn list_devices() {
    fail("Built without MIDI support; rebuild with --features midi", 1);
}
