//! Audio cues and background music
//!
//! Procedurally generated with Web Audio oscillators in the browser, no
//! sample files needed. Native builds use [`SilentAudio`].

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Player boosted
    Boost,
    /// Obstacle passed
    Score,
    /// Session ended
    Hit,
}

/// Anything that can play the game's sounds. Calls are fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    /// Effective sfx and music gain (0.0 - 1.0), already muted/mixed
    fn set_volumes(&mut self, sfx: f32, music: f32);
}

/// Audio sink that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, cue: Cue) {
        log::trace!("cue {cue:?}");
    }

    fn start_music(&mut self) {
        log::trace!("music on");
    }

    fn stop_music(&mut self) {
        log::trace!("music off");
    }

    fn set_volumes(&mut self, sfx: f32, music: f32) {
        log::trace!("volumes sfx={sfx:.2} music={music:.2}");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AudioSink, Cue};
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Root of the music arpeggio (Hz)
    const MUSIC_ROOT: f32 = 165.0;
    /// The lead oscillator swings this far either side of the root
    const MUSIC_SWING: f32 = 55.0;
    /// Arpeggio rate (Hz)
    const MUSIC_RATE: f32 = 2.0;

    /// Looping music voice
    struct MusicVoice {
        lead: OscillatorNode,
        lfo: OscillatorNode,
        gain: GainNode,
    }

    /// Web Audio backed sink
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        music: Option<MusicVoice>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: 0.8,
                music_volume: 0.4,
                music: None,
            }
        }

        /// Resume audio context (required after user gesture)
        fn resume(ctx: &AudioContext) {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Boost - quick upward chirp
        fn play_boost(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Score - two-note ding
        fn play_score(ctx: &AudioContext, vol: f32) {
            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Hit - thump with a falling tail
        fn play_hit(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 150.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(150.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(50.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }

            for (i, freq) in [400.0, 300.0, 200.0].iter().enumerate() {
                let delay = 0.1 + i as f64 * 0.15;
                if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.12, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }

        /// Triangle lead whose pitch a square LFO flips between two notes
        fn create_music(ctx: &AudioContext, vol: f32) -> Option<MusicVoice> {
            let (lead, gain) = Self::create_osc(ctx, MUSIC_ROOT, OscillatorType::Triangle)?;
            gain.gain().set_value(vol * 0.15);

            let lfo = ctx.create_oscillator().ok()?;
            let depth = ctx.create_gain().ok()?;
            lfo.set_type(OscillatorType::Square);
            lfo.frequency().set_value(MUSIC_RATE);
            depth.gain().set_value(MUSIC_SWING);
            lfo.connect_with_audio_node(&depth).ok()?;
            depth.connect_with_audio_param(&lead.frequency()).ok()?;

            lead.start().ok()?;
            lfo.start().ok()?;
            Some(MusicVoice { lead, lfo, gain })
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: Cue) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            Self::resume(ctx);

            match cue {
                Cue::Boost => Self::play_boost(ctx, vol),
                Cue::Score => Self::play_score(ctx, vol),
                Cue::Hit => Self::play_hit(ctx, vol),
            }
        }

        fn start_music(&mut self) {
            self.stop_music();
            let Some(ctx) = &self.ctx else { return };
            Self::resume(ctx);
            self.music = Self::create_music(ctx, self.music_volume);
            if self.music.is_none() {
                log::warn!("Failed to start background music");
            }
        }

        fn stop_music(&mut self) {
            if let Some(voice) = self.music.take() {
                voice.lead.stop().ok();
                voice.lfo.stop().ok();
                voice.gain.disconnect().ok();
            }
        }

        fn set_volumes(&mut self, sfx: f32, music: f32) {
            self.sfx_volume = sfx.clamp(0.0, 1.0);
            self.music_volume = music.clamp(0.0, 1.0);
            if let Some(voice) = &self.music {
                voice.gain.gain().set_value(self.music_volume * 0.15);
            }
        }
    }
}
