//! Sound and speech output.
//!
//! `SoundBoard` owns the clip cache and the speak-instead-on-failure rule;
//! the actual playback goes through an [`AudioBackend`] so the browser
//! implementation (`HtmlAudioElement` + `speechSynthesis`) can be swapped for
//! a recording fake in tests.

use std::borrow::Cow;
use std::collections::HashMap;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, SpeechSynthesisUtterance, SpeechSynthesisVoice, window};

use crate::catalog::{Item, PackId};

pub const SPEECH_PITCH: f32 = 1.2;
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_LANG: &str = "en-US";

/// What tapping an item should produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Narration {
    Sound {
        src: &'static str,
        fallback: &'static str,
    },
    Speak(String),
}

impl Narration {
    pub fn for_item(pack: PackId, item: &Item) -> Self {
        match item.sound {
            Some(src) => Narration::Sound {
                src,
                fallback: item.name,
            },
            None if pack.narrates_with_prefix() => Narration::Speak(format!("This is {}", item.name)),
            None => Narration::Speak(item.name.to_string()),
        }
    }
}

/// A lone uppercase letter is spoken in lowercase so voices say "a"
/// rather than "capital a". Anything longer is left alone.
pub fn normalize_speech_text(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Cow::Owned(c.to_ascii_lowercase().to_string()),
        _ => Cow::Borrowed(text),
    }
}

/// Index of the preferred voice: a child or female voice, then a Google
/// voice (usually the most natural), then simply the first one.
pub fn pick_voice<S: AsRef<str>>(names: &[S]) -> Option<usize> {
    const FRIENDLY: [&str; 4] = ["child", "kids", "samantha", "female"];
    let lower: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    lower
        .iter()
        .position(|n| FRIENDLY.iter().any(|p| n.contains(p)))
        .or_else(|| lower.iter().position(|n| n.contains("google")))
        .or(if lower.is_empty() { None } else { Some(0) })
}

/// Playback primitives. `play` reports synchronous failures only; a
/// backend that fails later (e.g. a rejected play promise) must fall back
/// to speaking `fallback` itself.
pub trait AudioBackend {
    type Clip;
    fn load(&mut self, src: &str) -> Result<Self::Clip, String>;
    fn play(&mut self, clip: &Self::Clip, fallback: &str) -> Result<(), String>;
    fn pause(&mut self, clip: &Self::Clip);
    fn speak(&mut self, text: &str);
}

pub struct SoundBoard<B: AudioBackend> {
    backend: B,
    clips: HashMap<String, B::Clip>,
}

impl<B: AudioBackend> SoundBoard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clips: HashMap::new(),
        }
    }

    pub fn narrate(&mut self, narration: &Narration) {
        match narration {
            Narration::Sound { src, fallback } => self.play_sound(src, fallback),
            Narration::Speak(text) => self.speak(text),
        }
    }

    /// Play a cached clip from the start, speaking `fallback` if it cannot play.
    /// No retry: one failure goes straight to speech.
    pub fn play_sound(&mut self, src: &str, fallback: &str) {
        if !self.clips.contains_key(src) {
            match self.backend.load(src) {
                Ok(clip) => {
                    self.clips.insert(src.to_string(), clip);
                }
                Err(e) => {
                    warn!("cannot load {src} ({e}), speaking instead");
                    self.speak(fallback);
                    return;
                }
            }
        }
        let Some(clip) = self.clips.get(src) else {
            return;
        };
        if let Err(e) = self.backend.play(clip, fallback) {
            warn!("cannot play {src} ({e}), speaking instead");
            self.speak(fallback);
        }
    }

    pub fn speak(&mut self, text: &str) {
        let text = normalize_speech_text(text);
        self.backend.speak(&text);
    }

    /// Stop everything in the cache. Best effort, called before another item shows.
    pub fn pause_all(&mut self) {
        for clip in self.clips.values() {
            self.backend.pause(clip);
        }
    }

    pub fn cached_clips(&self) -> usize {
        self.clips.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

// --- Browser backend ---------------------------------------------------------

/// `HtmlAudioElement` clips plus `speechSynthesis`, degrading to `alert`.
#[derive(Debug, Default)]
pub struct BrowserAudio;

impl AudioBackend for BrowserAudio {
    type Clip = HtmlAudioElement;

    fn load(&mut self, src: &str) -> Result<HtmlAudioElement, String> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(|e| format!("{e:?}"))?;
        audio.set_cross_origin(Some("anonymous"));
        audio.set_loop(false);
        Ok(audio)
    }

    fn play(&mut self, clip: &HtmlAudioElement, fallback: &str) -> Result<(), String> {
        clip.set_current_time(0.0);
        let promise = clip.play().map_err(|e| format!("{e:?}"))?;
        let fallback = fallback.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                warn!("playback rejected, speaking '{fallback}'");
                speak_in_browser(&normalize_speech_text(&fallback));
            }
        });
        Ok(())
    }

    fn pause(&mut self, clip: &HtmlAudioElement) {
        let _ = clip.pause();
    }

    fn speak(&mut self, text: &str) {
        speak_in_browser(text);
    }
}

/// Speak through `speechSynthesis`, or show the text when it is missing.
pub fn speak_in_browser(text: &str) {
    let Some(win) = window() else {
        return;
    };
    let has_synth = js_sys::Reflect::has(&win, &JsValue::from_str("speechSynthesis")).unwrap_or(false);
    let spoken = if has_synth { utter(&win, text) } else { Err(JsValue::NULL) };
    if spoken.is_err() {
        let _ = win.alert_with_message(text);
    }
}

fn utter(win: &web_sys::Window, text: &str) -> Result<(), JsValue> {
    let synth = win.speech_synthesis()?;
    let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
    let voices: Vec<SpeechSynthesisVoice> = synth
        .get_voices()
        .iter()
        .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
        .collect();
    let names: Vec<String> = voices.iter().map(|v| v.name()).collect();
    if let Some(idx) = pick_voice(&names) {
        utterance.set_voice(Some(&voices[idx]));
    }
    utterance.set_lang(SPEECH_LANG);
    utterance.set_pitch(SPEECH_PITCH);
    utterance.set_rate(SPEECH_RATE);
    synth.speak(&utterance);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PackId;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(String),
        Play(String),
        Pause(String),
        Speak(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        missing: Vec<&'static str>,
        blocked: Vec<&'static str>,
    }

    impl AudioBackend for Recorder {
        type Clip = String;

        fn load(&mut self, src: &str) -> Result<String, String> {
            self.calls.push(Call::Load(src.into()));
            if self.missing.contains(&src) {
                return Err("404".into());
            }
            Ok(src.to_string())
        }

        fn play(&mut self, clip: &String, _fallback: &str) -> Result<(), String> {
            self.calls.push(Call::Play(clip.clone()));
            if self.blocked.contains(&clip.as_str()) {
                return Err("NotAllowedError".into());
            }
            Ok(())
        }

        fn pause(&mut self, clip: &String) {
            self.calls.push(Call::Pause(clip.clone()));
        }

        fn speak(&mut self, text: &str) {
            self.calls.push(Call::Speak(text.into()));
        }
    }

    #[test]
    fn single_capital_letter_is_lowercased() {
        assert_eq!(normalize_speech_text("A"), "a");
        assert_eq!(normalize_speech_text("Z"), "z");
    }

    #[test]
    fn longer_or_non_capital_text_is_untouched() {
        assert_eq!(normalize_speech_text("AB"), "AB");
        assert_eq!(normalize_speech_text("a"), "a");
        assert_eq!(normalize_speech_text("7"), "7");
        assert_eq!(normalize_speech_text(""), "");
        assert_eq!(normalize_speech_text("This is Red"), "This is Red");
    }

    #[test]
    fn voice_preference_order() {
        assert_eq!(pick_voice(&["Alex", "Google US English", "Samantha"]), Some(2));
        assert_eq!(pick_voice(&["Alex", "Google US English"]), Some(1));
        assert_eq!(pick_voice(&["Alex", "Daniel"]), Some(0));
        assert_eq!(pick_voice(&["Microsoft Zira - English (Female)"]), Some(0));
        assert_eq!(pick_voice::<&str>(&[]), None);
    }

    #[test]
    fn narration_prefers_sound_then_prefix() {
        let dog = &PackId::Animals.items()[0];
        assert_eq!(
            Narration::for_item(PackId::Animals, dog),
            Narration::Sound {
                src: "dog.mp3",
                fallback: "Dog"
            }
        );
        let red = &PackId::Colors.items()[0];
        assert_eq!(
            Narration::for_item(PackId::Colors, red),
            Narration::Speak("This is Red".into())
        );
        let winter = &PackId::Seasons.items()[3];
        assert_eq!(
            Narration::for_item(PackId::Seasons, winter),
            Narration::Speak("This is Winter".into())
        );
        let star = &PackId::Shapes.items()[4];
        assert_eq!(Narration::for_item(PackId::Shapes, star), Narration::Speak("Star".into()));
    }

    #[test]
    fn clips_are_cached_and_rewound() {
        let mut board = SoundBoard::new(Recorder::default());
        board.play_sound("cat.mp3", "Cat");
        board.play_sound("cat.mp3", "Cat");
        assert_eq!(board.cached_clips(), 1);
        let loads = board
            .backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Load(_)))
            .count();
        assert_eq!(loads, 1);
    }

    #[test]
    fn failed_playback_speaks_once_without_retry() {
        let mut recorder = Recorder::default();
        recorder.blocked.push("lion.mp3");
        let mut board = SoundBoard::new(recorder);
        board.play_sound("lion.mp3", "Lion");
        assert_eq!(
            board.backend().calls,
            vec![
                Call::Load("lion.mp3".into()),
                Call::Play("lion.mp3".into()),
                Call::Speak("Lion".into()),
            ]
        );
    }

    #[test]
    fn missing_clip_speaks_normalized_fallback() {
        let mut recorder = Recorder::default();
        recorder.missing.push("a.mp3");
        let mut board = SoundBoard::new(recorder);
        board.play_sound("a.mp3", "A");
        assert_eq!(board.backend().calls.last(), Some(&Call::Speak("a".into())));
        assert_eq!(board.cached_clips(), 0);
    }

    #[test]
    fn pause_all_touches_every_cached_clip() {
        let mut board = SoundBoard::new(Recorder::default());
        board.play_sound("dog.mp3", "Dog");
        board.play_sound("cow.mp3", "Cow");
        board.pause_all();
        let paused = board
            .backend()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Pause(_)))
            .count();
        assert_eq!(paused, 2);
    }
}
