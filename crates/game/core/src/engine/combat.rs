use crate::combat::{
    AttackError, DamageTaken, ShotResult, ShotRolls, WeaponProfile, distance_fraction,
    resolve_shot, shot_count,
};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::resources::LedgerMode;
use crate::state::{ActorId, Alignment, Position, TargetRef};

use super::GameEngine;

/// One roll of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub result: ShotResult,
    /// False when the target had already died earlier in the same attack.
    pub applied: bool,
}

/// Everything one attack charge produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: ActorId,
    pub target: TargetRef,
    pub weapon: String,
    pub target_in_cover: bool,
    pub shots: Vec<ShotRecord>,
    pub killed: bool,
}

impl AttackReport {
    /// Damage actually applied to the target.
    pub fn total_damage(&self) -> u32 {
        self.shots
            .iter()
            .filter(|shot| shot.applied)
            .map(|shot| shot.result.damage)
            .sum()
    }

    pub fn hits(&self) -> usize {
        self.shots.iter().filter(|shot| shot.result.damage > 0).count()
    }
}

impl<'a> GameEngine<'a> {
    /// Spends one attack charge on `target`.
    ///
    /// Preconditions are checked in order: alignment, remaining charges,
    /// range. Every roll of a burst or spread is drawn; rolls landing after
    /// the target died are reported but not applied. A kill deregisters the
    /// actor, or for a crate releases its pickups, before this returns.
    pub fn attack(
        &mut self,
        attacker: ActorId,
        target: TargetRef,
    ) -> Result<AttackReport, AttackError> {
        if !self.is_acting(attacker) {
            return Err(AttackError::OutOfTurn(attacker));
        }
        let actor = self
            .state
            .entities
            .actor(attacker)
            .ok_or(AttackError::OutOfTurn(attacker))?;
        let fighter = actor
            .fighter
            .as_ref()
            .ok_or(AttackError::NoCombatCapability(attacker))?;
        let (target_position, target_alignment) = self.target_profile(target)?;

        if !actor.alignment().can_target(target_alignment) {
            return Err(AttackError::InvalidTarget { target });
        }
        if fighter.attacks_remaining() == 0 {
            return Err(AttackError::NoAttacksRemaining);
        }

        let spatial = self.env.spatial();
        let distance_sqr = spatial.distance_sqr(actor.position, target_position);
        let weapon = fighter.select_weapon(distance_sqr)?.clone();
        // Melee always resolves as if the target stood in the open.
        let target_in_cover =
            !weapon.is_melee() && spatial.in_cover(actor.position, target_position);

        let fraction = distance_fraction(distance_sqr, weapon.range);
        let shots = shot_count(weapon.pattern, fraction, self.env.config().spread_falloff)
            .min(GameConfig::MAX_SHOTS_PER_ATTACK);
        let rolls: Vec<ShotRolls> = (0..shots)
            .map(|shot| self.draw_rolls(attacker, &weapon, shot))
            .collect();

        let remaining = match self
            .state
            .entities
            .actor_mut(attacker)
            .and_then(|a| a.fighter.as_mut())
        {
            Some(fighter) => {
                fighter.begin_attack()?;
                fighter.attacks_remaining()
            }
            None => return Err(AttackError::NoCombatCapability(attacker)),
        };
        self.emit(GameEvent::AttackCountChanged {
            actor: attacker,
            remaining,
        });

        let mut killed = false;
        let mut records = Vec::with_capacity(rolls.len());
        for rolls in rolls {
            let result = resolve_shot(&weapon, target_in_cover, rolls);
            let applied = !killed;
            if applied {
                killed = self.apply_shot(target, result);
            }
            self.emit(GameEvent::ShotFired {
                attacker,
                target,
                result,
                applied,
            });
            records.push(ShotRecord { result, applied });
        }

        if let Some(fighter) = self
            .state
            .entities
            .actor_mut(attacker)
            .and_then(|a| a.fighter.as_mut())
        {
            fighter.finish_attack();
        }

        if killed {
            match target {
                TargetRef::Actor(id) => self.handle_death(id),
                TargetRef::Crate(id) => self.break_crate(id, attacker),
            }
        }
        self.state.turn.nonce += 1;

        Ok(AttackReport {
            attacker,
            target,
            weapon: weapon.name,
            target_in_cover,
            shots: records,
            killed,
        })
    }

    /// Swaps the acting actor's drawn and holstered ranged weapons.
    pub fn switch_weapon(&mut self, actor: ActorId) -> Result<String, AttackError> {
        if !self.is_acting(actor) {
            return Err(AttackError::OutOfTurn(actor));
        }
        let fighter = self
            .state
            .entities
            .actor_mut(actor)
            .and_then(|a| a.fighter.as_mut())
            .ok_or(AttackError::NoCombatCapability(actor))?;
        let weapon = fighter.switch_weapon()?.name.clone();
        self.emit(GameEvent::WeaponSwitched {
            actor,
            weapon: weapon.clone(),
        });
        Ok(weapon)
    }

    /// Marks an actor dead and removes it from every registry.
    pub fn kill(&mut self, actor: ActorId) -> bool {
        let died = self
            .state
            .entities
            .actor_mut(actor)
            .and_then(|a| a.fighter.as_mut())
            .is_some_and(|f| f.die());
        if died {
            self.handle_death(actor);
        }
        died
    }

    fn handle_death(&mut self, id: ActorId) {
        let Some(actor) = self.state.entities.actor(id) else {
            return;
        };
        let alignment = actor.alignment();
        let ledger = actor.ledger;
        self.emit(GameEvent::ActorDied {
            actor: id,
            alignment,
        });

        // Deregistration needs the entity to decide whether its side fell.
        if self.state.turn.contains(id) {
            let _ = self.deregister(id);
        }
        self.state.entities.remove_actor(id);

        // Forwarding ledgers are pure aliases; owned ones keep their stock.
        if let Some(ledger) = ledger {
            if matches!(self.state.ledgers.mode(ledger), Some(LedgerMode::Forwarding(_))) {
                let _ = self.state.ledgers.close(ledger);
            }
        }
    }

    fn target_profile(&self, target: TargetRef) -> Result<(Position, Alignment), AttackError> {
        let entities = &self.state.entities;
        match target {
            TargetRef::Actor(id) => entities
                .actor(id)
                .filter(|a| a.fighter.is_some() && a.is_alive())
                .map(|a| (a.position, a.alignment())),
            TargetRef::Crate(id) => entities
                .crate_state(id)
                .filter(|c| !c.is_broken())
                .map(|c| (c.position, Alignment::Neutral)),
        }
        .ok_or(AttackError::TargetNotFound(target))
    }

    fn draw_rolls(&self, attacker: ActorId, weapon: &WeaponProfile, shot: u32) -> ShotRolls {
        let rng = self.env.rng();
        let base = shot * 3;
        ShotRolls {
            hit: rng.unit(self.roll_seed(attacker, base)),
            damage: rng.range(
                self.roll_seed(attacker, base + 1),
                weapon.damage_min,
                weapon.damage_max,
            ),
            critical: rng.unit(self.roll_seed(attacker, base + 2)),
        }
    }

    /// Applies one resolved roll. Returns true when it killed the target.
    fn apply_shot(&mut self, target: TargetRef, result: ShotResult) -> bool {
        match target {
            TargetRef::Actor(id) => {
                let Some(fighter) = self
                    .state
                    .entities
                    .actor_mut(id)
                    .and_then(|a| a.fighter.as_mut())
                else {
                    return false;
                };
                match fighter.take_damage(result.damage, result.is_critical()) {
                    DamageTaken::Nothing => false,
                    DamageTaken::Wounded { amount, critical } => {
                        self.emit(GameEvent::DamageTaken {
                            target,
                            amount,
                            critical,
                        });
                        false
                    }
                    DamageTaken::Killed => true,
                }
            }
            TargetRef::Crate(id) => {
                let Some(supply) = self.state.entities.crate_mut(id) else {
                    return false;
                };
                let broke = supply.take_damage(result.damage);
                if !broke && result.damage > 0 {
                    self.emit(GameEvent::DamageTaken {
                        target,
                        amount: result.damage,
                        critical: result.is_critical(),
                    });
                }
                broke
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::{AttackPattern, WeaponClass, WeaponProfile};
    use crate::engine::testing::{Field, Fixture, bot, commander, rifle};
    use crate::resources::{ResourceCounts, ResourceKind};
    use crate::state::{ActorKind, Archetype, GameState};

    use super::*;

    /// Player at the origin, an enemy commander far away and an enemy
    /// warrior bot five units out. The player acts first.
    fn skirmish(state: &mut GameState, fixture: &Fixture, player_weapon: WeaponProfile) -> ActorId {
        let mut engine = GameEngine::new(state, fixture.env());
        let mut player = commander(ActorKind::Player, false);
        player.primary = Some(player_weapon);
        engine
            .spawn(&player, Alignment::Player, Position::ORIGIN, None)
            .unwrap();
        engine
            .spawn(
                &commander(ActorKind::Enemy, false),
                Alignment::Enemy,
                Position::ground(40.0, 0.0),
                None,
            )
            .unwrap();
        let warrior = engine
            .spawn(&bot(Archetype::Warrior), Alignment::Enemy, Position::ground(5.0, 0.0), None)
            .unwrap();
        engine.start().unwrap();
        engine.take_events();
        warrior
    }

    #[test]
    fn fixed_damage_hits_exactly() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let warrior = skirmish(&mut state, &fixture, rifle(10));
        let mut engine = GameEngine::new(&mut state, fixture.env());

        let report = engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        assert_eq!(report.total_damage(), 10);
        assert!(!report.killed);
        assert!(engine.take_events().contains(&GameEvent::DamageTaken {
            target: TargetRef::Actor(warrior),
            amount: 10,
            critical: false
        }));
    }

    #[test]
    fn cover_subtracts_flat_penalty() {
        let mut fixture = Fixture::new();
        fixture.field = Field { cover_x: Some(2.5) };
        let mut state = GameState::default();
        let warrior = skirmish(&mut state, &fixture, rifle(10));
        let mut engine = GameEngine::new(&mut state, fixture.env());

        let report = engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        assert!(report.target_in_cover);
        assert_eq!(report.total_damage(), 5);
    }

    #[test]
    fn same_alignment_is_rejected_without_cost() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        skirmish(&mut state, &fixture, rifle(10));
        let ally = {
            let mut engine = GameEngine::new(&mut state, fixture.env());
            let ally = engine
                .spawn(
                    &bot(Archetype::Defender),
                    Alignment::Player,
                    Position::ground(1.0, 0.0),
                    None,
                )
                .unwrap();
            engine.take_events();
            ally
        };
        let before = state.clone();
        let mut engine = GameEngine::new(&mut state, fixture.env());

        assert_eq!(
            engine.attack(ActorId::PLAYER, TargetRef::Actor(ally)),
            Err(AttackError::InvalidTarget {
                target: TargetRef::Actor(ally)
            })
        );
        assert!(engine.take_events().is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn charges_and_range_are_enforced() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let warrior = skirmish(&mut state, &fixture, rifle(1));
        let mut engine = GameEngine::new(&mut state, fixture.env());

        let far = engine.state().entities.actors().find(|a| a.position.x > 30.0).unwrap().id();
        assert!(matches!(
            engine.attack(ActorId::PLAYER, TargetRef::Actor(far)),
            Err(AttackError::OutOfRange { .. })
        ));

        engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        assert_eq!(
            engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)),
            Err(AttackError::NoAttacksRemaining)
        );
    }

    #[test]
    fn only_the_head_may_attack() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let warrior = skirmish(&mut state, &fixture, rifle(10));
        let mut engine = GameEngine::new(&mut state, fixture.env());
        assert_eq!(
            engine.attack(warrior, TargetRef::Actor(ActorId::PLAYER)),
            Err(AttackError::OutOfTurn(warrior))
        );
    }

    #[test]
    fn burst_rolls_past_death_are_not_applied() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let burst = WeaponProfile::new(
            "Burst",
            WeaponClass::Rifle,
            AttackPattern::Burst { shots: 3 },
            10.0,
            10,
            10,
        );
        let warrior = skirmish(&mut state, &fixture, burst);
        let mut engine = GameEngine::new(&mut state, fixture.env());

        let report = engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        assert_eq!(report.shots.len(), 3);
        assert!(report.killed);
        assert_eq!(
            report.shots.iter().map(|s| s.applied).collect::<Vec<_>>(),
            vec![true, true, false]
        );
        assert_eq!(report.total_damage(), 20);

        let deaths = engine
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ActorDied { .. }))
            .count();
        assert_eq!(deaths, 1);
        assert!(!state.turn.contains(warrior));
        assert!(state.entities.actor(warrior).is_none());
        assert_eq!(state.player().unwrap().attacks_remaining(), 1);
    }

    #[test]
    fn killing_last_enemy_wins() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        let warrior = skirmish(&mut state, &fixture, rifle(100));
        let mut engine = GameEngine::new(&mut state, fixture.env());
        let far = engine.state().entities.actors().find(|a| a.position.x > 30.0).unwrap().id();
        assert!(engine.kill(far));
        assert!(!engine.kill(far));

        engine.attack(ActorId::PLAYER, TargetRef::Actor(warrior)).unwrap();
        let events = engine.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
                .count(),
            1
        );
        assert_eq!(state.turn.winner, Some(Alignment::Player));
    }

    #[test]
    fn broken_crate_exposes_pickups() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        skirmish(&mut state, &fixture, rifle(10));
        let mut engine = GameEngine::new(&mut state, fixture.env());
        let contents =
            ResourceCounts::from_pairs([(ResourceKind::Steel, 2), (ResourceKind::Wood, 1)]);
        let supply = engine.place_crate(Position::ground(0.0, 3.0), 15, contents);

        let first = engine.attack(ActorId::PLAYER, TargetRef::Crate(supply)).unwrap();
        assert!(!first.killed);
        let second = engine.attack(ActorId::PLAYER, TargetRef::Crate(supply)).unwrap();
        assert!(second.killed);

        let exposed = engine
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PickupExposed { .. }))
            .count();
        assert_eq!(exposed, 2);
        assert!(state.entities.crate_state(supply).is_none());
        assert_eq!(state.entities.pickups().map(|p| p.amount).sum::<u32>(), 3);
    }

    #[test]
    fn switch_weapon_reports_new_weapon() {
        let fixture = Fixture::new();
        let mut state = GameState::default();
        skirmish(&mut state, &fixture, rifle(10));
        let mut engine = GameEngine::new(&mut state, fixture.env());
        assert_eq!(
            engine.switch_weapon(ActorId::PLAYER),
            Err(AttackError::NoAlternateWeapon)
        );
    }
}
