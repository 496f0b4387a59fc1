//! Presentation boundary: sounds and floating text driven by combat events.
//!
//! The core never talks to devices. The host implements `AudioSink` and
//! `Overlay`, drains the run's events each frame and passes them to
//! `Presenter::present_events`.
//!
//! ## Cues
//!
//! | Event | Sound | Text |
//! |-------|-------|------|
//! | card played | card + attack type | |
//! | damage | damage or blocked | `-n` per absorbed/lost amount |
//! | block gained | block | `+n` |
//! | healed, rested | heal | `+n` |
//! | effect applied | buff or debuff | |
//! | debuff blocked | nullify | `Debuff Blocked` |
//! | card added to draw | | `Added <card> to draw pile` |
//! | rest stop | campfire loop | |

use crate::cards::AttackType;
use crate::catalog::Catalog;
use crate::combat::{CombatEvent, CombatantId};
use crate::effects::EffectType;
use crate::encounters::TurnState;

/// Sounds the core asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Card,
    Attack(AttackType),
    Damage,
    DamageBlocked,
    Block,
    Heal,
    Buff,
    Debuff,
    Nullify,
    Campfire,
    Victory,
}

/// Handle to a playing sound, issued by the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaybackId(pub u64);

/// Audio capability supplied by the host.
pub trait AudioSink {
    /// Start a sound. Looping cues keep playing until stopped.
    fn play(&mut self, cue: SoundCue) -> PlaybackId;

    fn stop(&mut self, playback: PlaybackId);
}

/// Text color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const WHITE: Self = Self(255, 255, 255, 255);
    pub const RED: Self = Self(255, 0, 0, 255);
    pub const BLUE: Self = Self(0, 100, 255, 255);
    pub const GREEN: Self = Self(0, 255, 0, 255);
    pub const ORANGE: Self = Self(255, 100, 0, 255);
    pub const SALMON: Self = Self(255, 100, 100, 255);
}

/// Where transient text is anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Next to a combatant's health bar.
    Combatant(CombatantId),
    /// Above the combatant, for status notes.
    Status(CombatantId),
    /// Centered screen banner.
    Banner,
}

/// One piece of transient text.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayText {
    pub text: String,
    pub placement: Placement,
    pub size: f32,
    pub color: Rgba,
    /// Seconds before the text expires.
    pub duration: f32,
}

impl OverlayText {
    fn new(text: impl Into<String>, placement: Placement, color: Rgba) -> Self {
        Self {
            text: text.into(),
            placement,
            size: 30.0,
            color,
            duration: 2.0,
        }
    }

    fn banner(text: impl Into<String>, color: Rgba) -> Self {
        Self {
            size: 50.0,
            ..Self::new(text, Placement::Banner, color)
        }
    }
}

/// Screen-space text capability supplied by the host.
pub trait Overlay {
    fn show(&mut self, text: OverlayText);
}

/// Turns events into cues. Keeps track of looping sounds.
#[derive(Debug, Default)]
pub struct Presenter {
    campfire: Option<PlaybackId>,
}

impl Presenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit sounds and text for a batch of events, oldest first.
    pub fn present_events(
        &mut self,
        events: &[CombatEvent],
        catalog: &Catalog,
        audio: &mut dyn AudioSink,
        overlay: &mut dyn Overlay,
    ) {
        for event in events {
            self.present(event, catalog, audio, overlay);
        }
    }

    fn present(
        &mut self,
        event: &CombatEvent,
        catalog: &Catalog,
        audio: &mut dyn AudioSink,
        overlay: &mut dyn Overlay,
    ) {
        match *event {
            CombatEvent::CardPlayed { attack_type, .. } => {
                audio.play(SoundCue::Card);
                if attack_type != AttackType::None {
                    audio.play(SoundCue::Attack(attack_type));
                }
            }
            CombatEvent::Damaged {
                target,
                blocked,
                health_lost,
            } => {
                if blocked > 0 {
                    overlay.show(OverlayText::new(format!("-{blocked}"), Placement::Combatant(target), Rgba::BLUE));
                }
                if health_lost > 0 {
                    overlay.show(OverlayText::new(format!("-{health_lost}"), Placement::Combatant(target), Rgba::RED));
                    audio.play(SoundCue::Damage);
                } else if blocked > 0 {
                    audio.play(SoundCue::DamageBlocked);
                }
            }
            CombatEvent::BlockGained { target, amount } => {
                overlay.show(OverlayText::new(format!("+{amount}"), Placement::Combatant(target), Rgba::BLUE));
                audio.play(SoundCue::Block);
            }
            CombatEvent::Healed { target, amount } => {
                overlay.show(OverlayText::new(format!("+{amount}"), Placement::Combatant(target), Rgba::GREEN));
                audio.play(SoundCue::Heal);
            }
            CombatEvent::EffectApplied { effect, .. } => {
                match catalog.effect(effect).map(|d| d.effect_type) {
                    Some(EffectType::Buff) => {
                        audio.play(SoundCue::Buff);
                    }
                    Some(EffectType::Debuff) => {
                        audio.play(SoundCue::Debuff);
                    }
                    Some(EffectType::Unknown) | None => {}
                }
            }
            CombatEvent::DebuffBlocked { target, .. } => {
                let mut text = OverlayText::new("Debuff\nBlocked", Placement::Status(target), Rgba::ORANGE);
                text.size = 27.5;
                overlay.show(text);
                audio.play(SoundCue::Nullify);
            }
            CombatEvent::CardAddedToDraw { card } => {
                let name = catalog.card(card).map_or("a card", |d| d.name.as_str());
                let mut text = OverlayText::new(
                    format!("Added {name} to\ndraw pile"),
                    Placement::Status(CombatantId::Player),
                    Rgba::ORANGE,
                );
                text.size = 27.5;
                overlay.show(text);
            }
            CombatEvent::TurnStarted { side, turn } => {
                let (label, color) = match side {
                    TurnState::Player => ("Player's Turn", Rgba::WHITE),
                    TurnState::Enemy => ("Enemy's Turn", Rgba::SALMON),
                };
                overlay.show(OverlayText::banner(format!("Turn {turn}: {label}"), color));
            }
            CombatEvent::EncounterBegan { .. } => {
                if let Some(playback) = self.campfire.take() {
                    audio.stop(playback);
                }
            }
            CombatEvent::EncounterWon => {
                overlay.show(OverlayText::banner("Victory!", Rgba::GREEN));
            }
            CombatEvent::RewardOffered { .. } => {
                overlay.show(OverlayText::banner("Reward! Pick One:", Rgba::WHITE));
            }
            CombatEvent::RestStopEntered => {
                if self.campfire.is_none() {
                    self.campfire = Some(audio.play(SoundCue::Campfire));
                }
            }
            CombatEvent::RunWon => {
                audio.play(SoundCue::Victory);
            }
            CombatEvent::RunLost => {
                overlay.show(OverlayText::banner("GAME OVER", Rgba::RED));
            }
            CombatEvent::EnergyGained { .. }
            | CombatEvent::EffectExpired { .. }
            | CombatEvent::IntentionChosen { .. }
            | CombatEvent::IntentionPerformed { .. }
            | CombatEvent::EnemyDefeated { .. }
            | CombatEvent::RewardTaken { .. }
            | CombatEvent::Rested { .. }
            | CombatEvent::SavePointRecorded => {}
        }
    }
}
