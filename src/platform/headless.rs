//! In-memory host
//!
//! Records every request the simulation makes. Used by the demo binary and
//! by tests to drive sessions without an engine.

use std::collections::{BTreeMap, HashSet};

use glam::Vec2;

use super::{EntityFactory, EntityHandle, EntityKind, InputProvider, SceneLifecycle};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::INITIAL_LIVES;
use crate::sim::TickInput;
use crate::ui::{Panel, ReloadHandle, UiSink};

/// A recorded audio request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play(SoundEffect),
    Stop(SoundEffect),
}

#[derive(Debug)]
pub struct HeadlessHost {
    /// Whether the play scene is active
    pub scene_active: bool,
    /// Input returned by every sample
    pub input: TickInput,
    /// Kinds whose spawn fails
    pub missing: Vec<EntityKind>,
    /// Audio requests in order
    pub audio_log: Vec<AudioEvent>,
    /// Life icon visibility by index
    pub life_indicators: Vec<bool>,
    entities: BTreeMap<EntityHandle, (EntityKind, Vec2)>,
    expiring: Vec<(EntityHandle, f32)>,
    panels: HashSet<Panel>,
    reload: Option<ReloadHandle>,
    next_handle: u64,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Host with the play scene active and nothing pressed
    pub fn new() -> Self {
        Self {
            scene_active: true,
            input: TickInput::default(),
            missing: Vec::new(),
            audio_log: Vec::new(),
            life_indicators: vec![true; INITIAL_LIVES as usize],
            entities: BTreeMap::new(),
            expiring: Vec::new(),
            panels: HashSet::new(),
            reload: None,
            next_handle: 1,
        }
    }

    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        self.entities.contains_key(&handle)
    }

    /// Live entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|(k, _)| *k == kind).count()
    }

    /// Spawn positions of live entities of one kind, in spawn order
    pub fn positions(&self, kind: EntityKind) -> Vec<Vec2> {
        self.entities
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, pos)| *pos)
            .collect()
    }

    /// Entities waiting on a delayed destroy, with the time left
    pub fn pending_destroys(&self) -> &[(EntityHandle, f32)] {
        &self.expiring
    }

    /// Advance the host clock, destroying expired entities
    pub fn advance(&mut self, dt: f32) {
        for (_, remaining) in &mut self.expiring {
            *remaining -= dt;
        }
        let (expired, waiting): (Vec<_>, Vec<_>) =
            self.expiring.drain(..).partition(|(_, remaining)| *remaining <= 0.0);
        self.expiring = waiting;
        for (handle, _) in expired {
            self.entities.remove(&handle);
        }
    }

    pub fn is_shown(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }

    pub fn played(&self, effect: SoundEffect) -> bool {
        self.audio_log.contains(&AudioEvent::Play(effect))
    }

    pub fn stopped(&self, effect: SoundEffect) -> bool {
        self.audio_log.contains(&AudioEvent::Stop(effect))
    }

    /// Press play-again / replay. Returns false if nothing subscribed.
    pub fn click_reload(&self) -> bool {
        match &self.reload {
            Some(handle) => {
                handle.request();
                true
            }
            None => false,
        }
    }
}

impl SceneLifecycle for HeadlessHost {
    fn is_scene_active(&self) -> bool {
        self.scene_active
    }
}

impl InputProvider for HeadlessHost {
    fn sample(&mut self) -> TickInput {
        self.input
    }
}

impl EntityFactory for HeadlessHost {
    fn spawn(&mut self, kind: EntityKind, position: Vec2) -> Option<EntityHandle> {
        if self.missing.contains(&kind) {
            return None;
        }
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.entities.insert(handle, (kind, position));
        Some(handle)
    }

    fn destroy(&mut self, handle: EntityHandle) {
        self.entities.remove(&handle);
        self.expiring.retain(|(h, _)| *h != handle);
    }

    fn destroy_after(&mut self, handle: EntityHandle, delay: f32) {
        self.expiring.push((handle, delay));
    }
}

impl AudioSink for HeadlessHost {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("play {}", effect.as_str());
        self.audio_log.push(AudioEvent::Play(effect));
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::trace!("stop {}", effect.as_str());
        self.audio_log.push(AudioEvent::Stop(effect));
    }
}

impl UiSink for HeadlessHost {
    fn show(&mut self, panel: Panel) {
        self.panels.insert(panel);
    }

    fn hide(&mut self, panel: Panel) {
        self.panels.remove(&panel);
    }

    fn set_life_indicator(&mut self, index: usize, visible: bool) {
        if index >= self.life_indicators.len() {
            self.life_indicators.resize(index + 1, false);
        }
        self.life_indicators[index] = visible;
    }

    fn subscribe_reload(&mut self, handle: ReloadHandle) {
        self.reload = Some(handle);
    }
}
