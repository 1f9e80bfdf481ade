use super::clock::DeviceClock;
use super::{AudioDevice, Dispatcher, MonotonicClock, Pulse, PulseSink};
use crate::{Error, Result};
use log::{debug, error, info};
use midir::{MidiOutput, MidiOutputConnection};
use std::time::Duration;

/// How a pulse is rendered as MIDI
#[derive(Debug, Clone, PartialEq)]
pub struct MidiClickSettings {
    /// Substring of the output port name; first available port when `None`
    pub device: Option<String>,
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
    /// Time between note-on and note-off
    pub gate: Duration,
}

impl Default for MidiClickSettings {
    fn default() -> Self {
        Self {
            device: None,
            channel: 9, // General MIDI percussion
            note: 76,   // Hi wood block
            velocity: 100,
            gate: Duration::from_millis(30),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ClickEvent {
    NoteOn,
    NoteOff,
    AllNotesOff,
}

impl ClickEvent {
    fn to_bytes(self, settings: &MidiClickSettings) -> [u8; 3] {
        let channel = settings.channel & 0x0F;
        // Data bytes are 7-bit; a set high bit would read as a status byte
        let note = settings.note & 0x7F;
        let velocity = settings.velocity & 0x7F;
        match self {
            ClickEvent::NoteOn => [0x90 | channel, note, velocity],
            ClickEvent::NoteOff => [0x80 | channel, note, 0],
            ClickEvent::AllNotesOff => [0xB0 | channel, 123, 0],
        }
    }
}

/// Output device that plays each pulse as a short note on a MIDI output port
#[derive(Debug, Default)]
pub struct MidiClick {
    settings: MidiClickSettings,
}

impl MidiClick {
    pub fn new(settings: MidiClickSettings) -> Self {
        Self { settings }
    }

    fn connect(&self) -> Result<MidiOutputConnection> {
        let midi_out = MidiOutput::new("pacekeeper-output")?;
        let out_ports = midi_out.ports();
        let available: Vec<String> = out_ports
            .iter()
            .filter_map(|p| midi_out.port_name(p).ok())
            .collect();
        debug!("Available MIDI output ports: {:?}", available);

        let port = match &self.settings.device {
            Some(name) => out_ports
                .iter()
                .find(|p| midi_out.port_name(p).unwrap_or_default().contains(name.as_str()))
                .ok_or_else(|| {
                    error!("MIDI output device '{}' not found", name);
                    Error::DeviceUnavailable(format!("MIDI output '{}' not found", name))
                })?,
            None => out_ports.first().ok_or_else(|| {
                Error::DeviceUnavailable("no MIDI output ports available".to_string())
            })?,
        };

        let port_name = midi_out
            .port_name(port)
            .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;
        info!("Connecting to MIDI output port: {}", port_name);
        Ok(midi_out.connect(port, "pacekeeper-click")?)
    }
}

impl AudioDevice for MidiClick {
    fn open(&mut self) -> Result<Box<dyn PulseSink>> {
        let mut connection = self.connect()?;
        let settings = self.settings.clone();
        let gate = settings.gate;

        let dispatcher = Dispatcher::spawn(
            "pacekeeper-midi",
            MonotonicClock::new(),
            move |event: ClickEvent| {
                if let Err(e) = connection.send(&event.to_bytes(&settings)) {
                    error!("Failed to send MIDI {:?}: {}", event, e);
                }
            },
        )?;

        Ok(Box::new(MidiSink { dispatcher, gate }))
    }

    fn name(&self) -> String {
        match &self.settings.device {
            Some(name) => format!("MIDI output '{}'", name),
            None => "first MIDI output".to_string(),
        }
    }
}

struct MidiSink {
    dispatcher: Dispatcher<ClickEvent>,
    gate: Duration,
}

impl PulseSink for MidiSink {
    fn now(&self) -> Duration {
        self.dispatcher.clock().now()
    }

    fn schedule(&mut self, pulse: Pulse) -> Result<()> {
        self.dispatcher.submit(pulse.at, ClickEvent::NoteOn)?;
        self.dispatcher.submit(pulse.at + self.gate, ClickEvent::NoteOff)
    }
}

impl Drop for MidiSink {
    fn drop(&mut self) {
        let _ = self
            .dispatcher
            .submit(self.now(), ClickEvent::AllNotesOff);
        info!("MIDI click output released");
    }
}

/// Names of the MIDI output ports currently visible
pub fn list_output_ports() -> Result<Vec<String>> {
    let midi_out = MidiOutput::new("pacekeeper-port-lister")?;
    Ok(midi_out
        .ports()
        .iter()
        .filter_map(|p| midi_out.port_name(p).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_bytes_use_configured_channel() {
        let settings = MidiClickSettings {
            channel: 2,
            note: 60,
            velocity: 90,
            ..MidiClickSettings::default()
        };

        assert_eq!(ClickEvent::NoteOn.to_bytes(&settings), [0x92, 60, 90]);
        assert_eq!(ClickEvent::NoteOff.to_bytes(&settings), [0x82, 60, 0]);
        assert_eq!(ClickEvent::AllNotesOff.to_bytes(&settings), [0xB2, 123, 0]);
    }

    #[test]
    fn test_channel_is_masked_to_four_bits() {
        let settings = MidiClickSettings {
            channel: 0x1A,
            ..MidiClickSettings::default()
        };
        assert_eq!(ClickEvent::NoteOn.to_bytes(&settings)[0], 0x9A);
    }

    #[test]
    fn test_note_and_velocity_stay_data_bytes() {
        let settings = MidiClickSettings {
            note: 200,
            velocity: 255,
            ..MidiClickSettings::default()
        };
        let bytes = ClickEvent::NoteOn.to_bytes(&settings);
        assert_eq!(bytes, [0x99, 200 & 0x7F, 0x7F]);
        assert!(bytes[1..].iter().all(|b| b & 0x80 == 0));
        assert!(ClickEvent::NoteOff.to_bytes(&settings)[1..]
            .iter()
            .all(|b| b & 0x80 == 0));
    }
}
