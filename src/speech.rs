//! Shared text-to-speech coordination.
//!
//! Several voice-guide buttons can live on one screen but only one of them
//! may speak at a time. [`SpeechCoordinator`] owns that fact and tells
//! subscribers whenever the active speaker changes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance};

use crate::config::SpeechConfig;
use crate::error::SpeechError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeakerId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            lang: config.lang.clone(),
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        }
    }
}

/// Called exactly once when an utterance ends, errors out, or is cancelled.
pub type DoneCallback = Box<dyn FnOnce()>;

pub trait SpeechBackend {
    fn speak(&self, request: &SpeechRequest, on_done: DoneCallback) -> Result<(), SpeechError>;
    fn cancel(&self);
}

type Listener = Rc<dyn Fn(Option<SpeakerId>)>;

struct Inner {
    backend: Rc<dyn SpeechBackend>,
    active: Option<(SpeakerId, u64)>,
    next_speaker: u64,
    next_ticket: u64,
    next_listener: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Handle to the shared speech service. Clones share state.
#[derive(Clone)]
pub struct SpeechCoordinator {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for SpeechCoordinator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SpeechCoordinator {
    pub fn new(backend: Rc<dyn SpeechBackend>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                backend,
                active: None,
                next_speaker: 1,
                next_ticket: 1,
                next_listener: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// Coordinator backed by the browser's `speechSynthesis`.
    pub fn browser() -> Self {
        Self::new(Rc::new(WebSpeech))
    }

    pub fn register(&self) -> SpeakerId {
        let mut inner = self.inner.borrow_mut();
        let id = SpeakerId(inner.next_speaker);
        inner.next_speaker += 1;
        id
    }

    pub fn active(&self) -> Option<SpeakerId> {
        self.inner.borrow().active.map(|(id, _)| id)
    }

    pub fn is_speaking(&self, id: SpeakerId) -> bool {
        self.active() == Some(id)
    }

    /// Stop whatever is playing and start `request` on behalf of `id`.
    pub fn speak(&self, id: SpeakerId, request: SpeechRequest) -> Result<(), SpeechError> {
        let (backend, ticket) = {
            let mut inner = self.inner.borrow_mut();
            let ticket = inner.next_ticket;
            inner.next_ticket += 1;
            inner.active = Some((id, ticket));
            (inner.backend.clone(), ticket)
        };

        backend.cancel();
        self.notify();

        let weak = Rc::downgrade(&self.inner);
        let on_done: DoneCallback = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                SpeechCoordinator { inner }.finish(ticket);
            }
        });

        log::info!("speaking {} chars as {:?}", request.text.chars().count(), id);
        if let Err(e) = backend.speak(&request, on_done) {
            self.finish(ticket);
            return Err(e);
        }
        Ok(())
    }

    /// Cancel the current utterance, whoever owns it.
    pub fn stop(&self) {
        let (backend, ticket) = {
            let inner = self.inner.borrow();
            (inner.backend.clone(), inner.active.map(|(_, t)| t))
        };
        backend.cancel();
        if let Some(ticket) = ticket {
            self.finish(ticket);
        }
    }

    /// Listen for active-speaker changes. The listener is removed when the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(Option<SpeakerId>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let key = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((key, Rc::new(listener)));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            key,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Completion for the utterance identified by `ticket`. Late callbacks
    /// from replaced utterances are ignored.
    fn finish(&self, ticket: u64) {
        {
            let mut inner = self.inner.borrow_mut();
            match inner.active {
                Some((_, current)) if current == ticket => inner.active = None,
                _ => return,
            }
        }
        log::info!("speech finished");
        self.notify();
    }

    fn notify(&self) {
        let (active, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.active.map(|(id, _)| id), listeners)
        };
        for listener in listeners {
            listener(active);
        }
    }
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    inner: Weak<RefCell<Inner>>,
    key: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.retain(|(key, _)| *key != self.key);
        }
    }
}

/// `window.speechSynthesis` backend.
pub struct WebSpeech;

impl WebSpeech {
    fn synth() -> Option<SpeechSynthesis> {
        gloo_utils::window()
            .speech_synthesis()
            .ok()
            .filter(|synth| !synth.is_undefined())
    }
}

impl SpeechBackend for WebSpeech {
    fn speak(&self, request: &SpeechRequest, on_done: DoneCallback) -> Result<(), SpeechError> {
        let synth = Self::synth().ok_or(SpeechError::Unsupported)?;
        let utterance = SpeechSynthesisUtterance::new_with_text(&request.text)
            .map_err(|e| SpeechError::Utterance(format!("{:?}", e)))?;
        utterance.set_lang(&request.lang);
        utterance.set_rate(request.rate);
        utterance.set_pitch(request.pitch);
        utterance.set_volume(request.volume);

        // onend and onerror share a single completion.
        let done = Rc::new(RefCell::new(Some(on_done)));
        let on_end = {
            let done = done.clone();
            Closure::once_into_js(move || {
                if let Some(done) = done.borrow_mut().take() {
                    done();
                }
            })
        };
        let on_error = Closure::once_into_js(move || {
            if let Some(done) = done.borrow_mut().take() {
                done();
            }
        });
        utterance.set_onend(Some(on_end.unchecked_ref()));
        utterance.set_onerror(Some(on_error.unchecked_ref()));

        synth.speak(&utterance);
        Ok(())
    }

    fn cancel(&self) {
        if let Some(synth) = Self::synth() {
            synth.cancel();
        }
    }
}
