//! Audio Engine - Composition Root
//!
//! The engine owns the DSP pipeline, the shared configuration and the
//! hardware-output collaborator, and wires the two concurrent contexts of
//! the surrounding system together:
//!
//! ```text
//! Control context (shell / remote control)
//!     Controller ──Command channel──▶ engine
//!                                       │ applied to SharedConfig
//! Audio-delivery context (transport data callback)
//!     on_block(pcm) ──▶ drain commands ──▶ snapshot config
//!                   ──▶ DspPipeline::process ──▶ AudioOutput::write
//! ```
//!
//! Commands are drained at block boundaries and the pipeline consumes one
//! configuration snapshot per block, so a block never observes a
//! half-applied update.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use tracing::{info, warn};

use heron_dsp::{DspConfig, DspPipeline, SharedConfig, PRESETS};

use crate::config::StreamConfig;
use crate::error::{EngineError, EngineResult};
use crate::message::{Command, Event};
use crate::output::AudioOutput;

/// Cloneable handle for sending commands to the engine from control
/// contexts.
#[derive(Clone)]
pub struct Controller {
    sender: Sender<Command>,
}

impl Controller {
    /// Send a raw command
    pub fn send(&self, command: Command) -> EngineResult<()> {
        self.sender
            .send(command)
            .map_err(|_| EngineError::ChannelDisconnected)
    }

    pub fn set_volume(&self, percent: u8) -> EngineResult<()> {
        self.send(Command::SetVolume(percent))
    }

    pub fn set_eq_preset(&self, index: usize) -> EngineResult<()> {
        self.send(Command::SetEqPreset(index))
    }

    pub fn set_balance(&self, balance: f32) -> EngineResult<()> {
        self.send(Command::SetBalance(balance))
    }

    pub fn set_dsp_enabled(&self, enabled: bool) -> EngineResult<()> {
        self.send(Command::SetDspEnabled(enabled))
    }

    pub fn shutdown(&self) -> EngineResult<()> {
        self.send(Command::Shutdown)
    }
}

/// The audio engine: processing subsystem plus its control surface
pub struct AudioEngine<O: AudioOutput> {
    pipeline: DspPipeline,
    config: SharedConfig,
    output: O,
    preset_index: usize,
    command_rx: Receiver<Command>,
    event_tx: Sender<Event>,
    shut_down: bool,
}

impl<O: AudioOutput> AudioEngine<O> {
    /// Build an engine for the given stream, returning the engine, a
    /// cloneable [`Controller`] and the event receiver.
    ///
    /// Initializes the pipeline and reclocks the output collaborator so
    /// filters and converter agree on the sample rate from the start.
    pub fn new(
        mut output: O,
        stream: StreamConfig,
    ) -> EngineResult<(Self, Controller, Receiver<Event>)> {
        stream.validate().map_err(EngineError::Config)?;

        let mut pipeline = DspPipeline::new();
        pipeline.init(stream.sample_rate)?;
        output.set_sample_rate(stream.sample_rate)?;

        let (command_tx, command_rx) = bounded::<Command>(32);
        let (event_tx, event_rx) = unbounded::<Event>();

        info!(
            sample_rate = stream.sample_rate,
            block_size = stream.block_size,
            "audio engine started"
        );

        let engine = Self {
            pipeline,
            config: SharedConfig::default(),
            output,
            preset_index: 0,
            command_rx,
            event_tx,
            shut_down: false,
        };
        let controller = Controller { sender: command_tx };
        Ok((engine, controller, event_rx))
    }

    /// Handle to the shared configuration (e.g. for direct inspection)
    pub fn config(&self) -> SharedConfig {
        self.config.clone()
    }

    /// The hardware-output collaborator
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Whether `Shutdown` has been processed
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Transport data-arrival path: process one PCM block and forward it
    /// to the hardware output.
    ///
    /// Pending commands are applied first, so configuration changes land
    /// exactly on block boundaries. After shutdown, blocks are dropped
    /// silently.
    pub fn on_block(&mut self, block: &[u8]) -> EngineResult<()> {
        self.drain_commands();

        if self.shut_down {
            return Ok(());
        }

        let snapshot = self.config.snapshot();
        let processed = self.pipeline.process(block, &snapshot)?;
        self.output.write(processed)
    }

    /// Transport notification: the stream renegotiated its sample rate.
    ///
    /// Pipeline and output collaborator are updated together to keep
    /// filter designs and converter clock consistent.
    pub fn on_sample_rate_changed(&mut self, sample_rate_hz: u32) -> EngineResult<()> {
        self.pipeline.set_sample_rate(sample_rate_hz)?;
        self.output.set_sample_rate(sample_rate_hz)?;
        self.emit(Event::SampleRateChanged(sample_rate_hz));
        Ok(())
    }

    /// Tear the engine down, releasing DSP resources. Idempotent.
    pub fn deinit(&mut self) {
        self.pipeline.deinit();
        self.shut_down = true;
    }

    /// Apply all pending commands. Failures are reported as events, never
    /// allowed to stall the audio path.
    fn drain_commands(&mut self) {
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => {
                    if let Err(e) = self.handle_command(command) {
                        warn!("command failed: {}", e);
                        self.emit(Event::error(e));
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> EngineResult<()> {
        match command {
            Command::SetVolume(percent) => {
                self.config.update(|c| c.set_volume_percent(percent));
                info!(percent, "volume changed");
                self.emit_config_changed();
            }
            Command::SetEqPreset(index) => {
                self.apply_preset(index)?;
            }
            Command::NextEqPreset => {
                let next = (self.preset_index + 1) % PRESETS.len();
                self.apply_preset(next)?;
            }
            Command::SetEqGains {
                bass_db,
                mid_db,
                treble_db,
            } => {
                self.config
                    .update(|c| c.set_band_gains(bass_db, mid_db, treble_db));
                info!(bass_db, mid_db, treble_db, "EQ gains changed");
                self.emit_config_changed();
            }
            Command::SetBalance(balance) => {
                self.config.update(|c| c.set_balance(balance));
                info!(balance, "balance changed");
                self.emit_config_changed();
            }
            Command::SetDspEnabled(enabled) => {
                self.config.update(|c| c.enabled = enabled);
                info!(enabled, "DSP enable flag changed");
                self.emit_config_changed();
            }
            Command::ToggleDsp => {
                self.config.update(|c| c.enabled = !c.enabled);
                self.emit_config_changed();
            }
            Command::ResetDsp => {
                self.config.update(|c| *c = DspConfig::default());
                self.preset_index = 0;
                info!("DSP settings reset to defaults");
                self.emit_config_changed();
            }
            Command::SetSampleRate(rate) => {
                self.on_sample_rate_changed(rate)?;
            }
            Command::Shutdown => {
                self.shut_down = true;
                info!("engine shutting down");
                self.emit(Event::ShutDown);
            }
        }
        Ok(())
    }

    fn apply_preset(&mut self, index: usize) -> EngineResult<()> {
        let preset = PRESETS.get(index).ok_or(EngineError::UnknownPreset(index))?;
        self.config.update(|c| c.apply_preset(preset));
        self.preset_index = index;
        info!(preset = preset.name, "EQ preset applied");
        self.emit(Event::PresetChanged {
            index,
            name: preset.name.to_string(),
        });
        self.emit_config_changed();
        Ok(())
    }

    fn emit_config_changed(&self) {
        self.emit(Event::ConfigChanged(self.config.snapshot()));
    }

    /// Events are best-effort: a vanished listener must not break audio
    fn emit(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}
