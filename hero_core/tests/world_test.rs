//! Integration test: Spawn -> Shoot -> Abilities -> Death -> Respawn
//!
//! Drives the World with the embedded default data the way the hit-detection
//! layer and input handling would.

use hero_core::prelude::*;
use hero_core::{AbilityPhase, AreaId, ColliderId, KillContext, RejectReason};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

struct Range {
    world: World,
    soldier: EntityId,
    tank: EntityId,
}

fn training_range() -> Range {
    let mut world = World::new(default_registry());
    let soldier = world
        .spawn("Soldier", "soldier", Team(0), Controller::Player)
        .unwrap();
    let tank = world
        .spawn("Training Tank", "training_tank", Team(1), Controller::Bot)
        .unwrap();
    Range {
        world,
        soldier,
        tank,
    }
}

fn spawned_area(world: &World) -> AreaId {
    world
        .events()
        .iter()
        .rev()
        .find_map(|event| match event {
            GameEvent::AreaSpawned { area, .. } => Some(*area),
            _ => None,
        })
        .expect("an area was spawned")
}

fn health(world: &World, id: EntityId) -> f64 {
    world.entity(id).unwrap().hero.hit_points.health
}

#[test]
fn test_weapon_hit_against_armour_awards_progression() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    // Inside falloff start: full 19, large hit on armour loses a flat 7
    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(10.0))
        .unwrap();
    assert!(approx(update.hit_value, 12.0));
    assert!(approx(update.mitigated_by_armour, 7.0));
    assert!(approx(world.entity(tank).unwrap().hero.hit_points.armour, 238.0));

    let hero = &world.entity(soldier).unwrap().hero;
    assert!(approx(hero.ultimate.current, 12.0));
    assert!(approx(hero.perk.current, 12.0));

    // Damage-role passive on a tank
    let tank_hero = &world.entity(tank).unwrap().hero;
    assert!(tank_hero.damage_passive_active());
    assert!(approx(tank_hero.modifiers.healing.compute(), 0.85));
}

#[test]
fn test_headshot_at_falloff_midpoint() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    // (19 + 5.7) / 2 = 12.35, doubled to 24.7, minus 7 on armour
    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(40.0).headshot())
        .unwrap();
    assert!(approx(update.modified_value, 24.7));
    assert!(approx(update.hit_value, 17.7));
}

#[test]
fn test_bot_damage_earns_nothing() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    world.update_hp(soldier, HpChange::damage(30.0).from(tank)).unwrap();
    assert!(approx(health(&world, soldier), 220.0));
    assert_eq!(world.entity(tank).unwrap().hero.ultimate.current, 0.0);
}

#[test]
fn test_kill_feed_and_respawn() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();
    let barrier = world.add_barrier(500.0, Some(tank));
    world.hit_barrier(barrier, 600.0);
    assert!(!world.barrier(barrier).unwrap().active);

    {
        let hp = &mut world.entity_mut(tank).unwrap().hero.hit_points;
        hp.health = 10.0;
        hp.armour = 0.0;
    }
    world.drain_events();

    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(5.0))
        .unwrap();
    assert!(update.died);
    assert!(approx(update.hit_value, 10.0));
    assert!(approx(update.overkill, 9.0));
    assert!(world.entity(tank).unwrap().dead);

    let events = world.drain_events();
    let deaths = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Died { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FinalBlow { by, victim, .. } if *by == soldier && *victim == tank
    )));

    let entry = world.kill_feed().latest().unwrap();
    assert_eq!(entry.killer_name, "Soldier");
    assert_eq!(entry.victim_name, "Training Tank");
    assert!(entry.friendly);
    assert_eq!(entry.context, KillContext::Weapon);

    // Dead entities are not resolved against
    assert!(world.apply_weapon_hit(soldier, tank, WeaponHit::at(5.0)).is_none());

    for _ in 0..4 {
        world.tick(1.0);
    }
    assert!(world.entity(tank).unwrap().dead);
    world.tick(1.0);

    let tank_entity = world.entity(tank).unwrap();
    assert!(!tank_entity.dead);
    assert!(tank_entity.hero.is_full());
    assert!(world.barrier(barrier).unwrap().active);
    assert!(world
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::Respawned { entity } if *entity == tank)));
}

#[test]
fn test_sourceless_death_is_self_attributed() {
    let Range {
        mut world, soldier, ..
    } = training_range();

    let update = world.update_hp(soldier, HpChange::damage(500.0)).unwrap();
    let blow = update.final_blow.unwrap();
    assert_eq!(blow.by, soldier);
    assert_eq!(blow.victim, soldier);

    let entry = world.kill_feed().latest().unwrap();
    assert!(entry.is_self_kill());
    assert!(entry.friendly);
}

#[test]
fn test_ultimate_lifecycle_and_kill_context() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    assert!(!world.activate_ultimate(soldier));
    assert!(world.apply_pickup(soldier, Pickup::UltimateAccelerator));
    assert!(world.entity(soldier).unwrap().hero.ultimate.ready);
    assert!(!world.apply_pickup(soldier, Pickup::UltimateAccelerator));

    assert!(world.activate_ultimate(soldier));
    let ultimate = world.entity(soldier).unwrap().hero.ultimate;
    assert!(ultimate.active);
    assert!(!ultimate.ready);
    assert_eq!(ultimate.current, 0.0);

    {
        let hp = &mut world.entity_mut(tank).unwrap().hero.hit_points;
        hp.health = 5.0;
        hp.armour = 0.0;
    }
    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(5.0))
        .unwrap();
    assert!(update.died);
    // Ultimate damage never feeds the ultimate
    assert!(update.progression_to.is_none());
    assert_eq!(
        world.kill_feed().latest().unwrap().context,
        KillContext::Ultimate("tactical_visor".into())
    );

    world.tick(0.5);
    assert_eq!(
        world.entity(soldier).unwrap().ability("tactical_visor").unwrap().phase,
        AbilityPhase::Active
    );
    world.tick(6.0);
    assert!(!world.entity(soldier).unwrap().hero.ultimate.active);
    assert!(world
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::UltimateEnded { entity } if *entity == soldier)));
}

#[test]
fn test_helix_rockets_area_affects_once_and_halves_self_damage() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    assert!(world.use_ability(soldier, "helix_rockets"));
    assert!(!world.use_ability(soldier, "helix_rockets"));
    let area = spawned_area(&world);

    // Owner inside the falloff start: 80 halved
    let outcome = world.apply_area_overlap(area, Overlap::new(soldier, ColliderId(1), 0.5));
    assert!(!outcome.is_rejected());
    assert!(approx(health(&world, soldier), 210.0));
    let hero = &world.entity(soldier).unwrap().hero;
    assert!(approx(hero.hit_points.self_damage, 40.0));
    assert_eq!(hero.ultimate.current, 0.0);

    // Midpoint of 1..3 is 52; this area ignores armour mitigation
    world.apply_area_overlap(area, Overlap::new(tank, ColliderId(2), 2.0));
    assert!(approx(world.entity(tank).unwrap().hero.hit_points.armour, 198.0));

    let again = world.apply_area_overlap(area, Overlap::new(tank, ColliderId(3), 2.0));
    assert_eq!(again, AreaOutcome::Rejected(RejectReason::AlreadyAffected));
    assert!(approx(world.entity(tank).unwrap().hero.hit_points.armour, 198.0));

    let knockbacks = world
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::Knockback { .. }))
        .count();
    assert_eq!(knockbacks, 2);

    // One-tick lifetime
    world.tick(1.0 / 60.0);
    assert!(world.area(area).is_none());
}

#[test]
fn test_healing_self_damage_earns_nothing() {
    let Range {
        mut world, soldier, ..
    } = training_range();

    world
        .update_hp(soldier, HpChange::damage(40.0).from(soldier))
        .unwrap();
    let update = world
        .update_hp(soldier, HpChange::healing(25.0).from(soldier))
        .unwrap();

    assert!(update.self_interaction);
    assert!(update.progression_to.is_none());
    let hero = &world.entity(soldier).unwrap().hero;
    assert!(approx(hero.hit_points.self_damage, 15.0));
    assert!(approx(hero.hit_points.health, 235.0));
    assert_eq!(hero.ultimate.current, 0.0);
}

#[test]
fn test_biotic_field_heals_per_tick() {
    let Range {
        mut world, soldier, ..
    } = training_range();
    world.update_hp(soldier, HpChange::damage(100.0)).unwrap();

    assert!(world.use_ability(soldier, "biotic_field"));
    assert!(world.areas().next().is_none());

    world.tick(0.5);
    let area = spawned_area(&world);
    // Spawned mid-tick with a 5 s lifetime, then aged by the same tick
    assert!(approx(world.area(area).unwrap().remaining, 4.5));

    // 40/s over the last 0.5 s tick
    world.apply_area_overlap(area, Overlap::new(soldier, ColliderId(1), 1.0));
    assert!(approx(health(&world, soldier), 170.0));

    // Same collider next tick is processed again, a second collider is not
    world.tick(0.5);
    world.apply_area_overlap(area, Overlap::new(soldier, ColliderId(1), 1.0));
    let second = world.apply_area_overlap(area, Overlap::new(soldier, ColliderId(9), 1.0));
    assert!(second.is_rejected());
    assert!(approx(health(&world, soldier), 190.0));

    // Line of sight required
    let blocked = world.apply_area_overlap(
        area,
        Overlap::new(soldier, ColliderId(1), 1.0).obstructed(None),
    );
    assert_eq!(blocked, AreaOutcome::Rejected(RejectReason::NoLineOfSight));
}

#[test]
fn test_stim_pack_heals_and_boosts_damage() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();
    world.update_hp(soldier, HpChange::damage(100.0)).unwrap();

    assert!(world.use_ability(soldier, "stim_pack"));
    world.tick(0.25);
    assert!(approx(health(&world, soldier), 156.25));

    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(10.0))
        .unwrap();
    assert!(approx(update.modified_value, 22.8));

    world.tick(4.0);
    let hero = &world.entity(soldier).unwrap().hero;
    assert!(approx(hero.modifiers.damage.compute(), 1.0));
    assert_eq!(
        world.entity(soldier).unwrap().ability("stim_pack").unwrap().phase,
        AbilityPhase::Cooldown
    );
}

#[test]
fn test_queued_perk_tier_surfaces_after_selection() {
    let Range {
        mut world, soldier, ..
    } = training_range();

    // The accelerator grants progress equal to the second threshold
    world.apply_pickup(soldier, Pickup::UltimateAccelerator);
    let perk = world.entity(soldier).unwrap().hero.perk;
    assert_eq!(perk.current_level, 2);
    assert!(perk.available);

    let first = world.select_perk(soldier, PerkChoice::First).unwrap();
    assert_eq!(first.level, 2);
    assert_eq!(first.next_tier, Some(3));
    assert!(world.events().iter().any(|e| matches!(
        e,
        GameEvent::PerkSelected { perk: Some(id), level: 2, .. } if id == "helix_ammo"
    )));

    let second = world.select_perk(soldier, PerkChoice::Second).unwrap();
    assert_eq!(second.level, 3);
    assert!(approx(
        world.entity(soldier).unwrap().hero.modifiers.damage.compute(),
        1.1
    ));
    assert!(world.select_perk(soldier, PerkChoice::First).is_none());
}

#[test]
fn test_helix_ammo_refunds_once_per_area() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();
    let support = world
        .spawn("Training Support", "training_support", Team(1), Controller::Bot)
        .unwrap();

    world.apply_pickup(soldier, Pickup::UltimateAccelerator);
    world.select_perk(soldier, PerkChoice::First);
    world
        .entity_mut(soldier)
        .unwrap()
        .weapon
        .as_mut()
        .unwrap()
        .magazine = 5;

    world.use_ability(soldier, "helix_rockets");
    let area = spawned_area(&world);
    world.apply_area_overlap(area, Overlap::new(tank, ColliderId(1), 0.0));
    world.apply_area_overlap(area, Overlap::new(support, ColliderId(2), 0.0));

    let weapon = world.entity(soldier).unwrap().weapon.clone().unwrap();
    assert_eq!(weapon.magazine, 20);
}

#[test]
fn test_barrier_soaks_shots() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();
    let barrier = world.add_barrier(200.0, Some(tank));

    let hit = WeaponHit::at(10.0).into_barrier(barrier);
    assert!(world.apply_weapon_hit(soldier, tank, hit).is_none());
    assert!(approx(world.barrier(barrier).unwrap().current, 181.0));
    assert!(world.entity(tank).unwrap().hero.is_full());
    assert_eq!(world.entity(soldier).unwrap().hero.ultimate.current, 0.0);

    for _ in 0..10 {
        world.apply_weapon_hit(soldier, tank, hit);
    }
    assert!(!world.barrier(barrier).unwrap().active);
    assert!(world
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::BarrierDestroyed { .. })));
}

#[test]
fn test_health_pack_only_below_full() {
    let Range {
        mut world, soldier, ..
    } = training_range();

    assert!(!world.apply_pickup(soldier, Pickup::HealthPack { value: 75.0 }));
    world.update_hp(soldier, HpChange::damage(50.0)).unwrap();
    assert!(world.apply_pickup(soldier, Pickup::HealthPack { value: 75.0 }));
    assert!(approx(health(&world, soldier), 250.0));
}

#[test]
fn test_health_regen_after_delay() {
    let Range {
        mut world, soldier, ..
    } = training_range();
    world.update_hp(soldier, HpChange::damage(100.0)).unwrap();

    for _ in 0..11 {
        world.tick(0.5);
    }
    assert!(approx(health(&world, soldier), 150.0));

    // (10 + 5% of 250) per second over one 0.5 s tick
    world.tick(0.5);
    assert!(approx(health(&world, soldier), 161.25));

    // Regeneration is not delivered value; only passive charge accrues
    assert!(approx(
        world.entity(soldier).unwrap().hero.ultimate.current,
        30.0
    ));
}

#[test]
fn test_shields_regenerate_after_delay() {
    let mut world = World::new(default_registry());
    let support = world
        .spawn("Support", "training_support", Team(0), Controller::Bot)
        .unwrap();
    world.update_hp(support, HpChange::damage(50.0)).unwrap();

    for _ in 0..5 {
        world.tick(0.5);
    }
    assert!(approx(
        world.entity(support).unwrap().hero.hit_points.shields,
        25.0
    ));

    world.tick(0.5);
    let hero = &world.entity(support).unwrap().hero;
    assert!(hero.hit_points.shields > 25.0);
    assert!(hero.is_healing);

    for _ in 0..20 {
        world.tick(0.5);
    }
    let hero = &world.entity(support).unwrap().hero;
    assert!(hero.is_full());
    assert!(!hero.is_healing);
}

#[test]
fn test_friendly_weapon_hit_uses_healing_delta() {
    let Range {
        mut world, soldier, ..
    } = training_range();
    let ally = world
        .spawn("Ally", "training_support", Team(0), Controller::Bot)
        .unwrap();
    world.update_hp(ally, HpChange::damage(20.0)).unwrap();

    let update = world
        .apply_weapon_hit(soldier, ally, WeaponHit::at(5.0))
        .unwrap();
    assert_eq!(update.kind, DeltaKind::Healing);
    assert_eq!(update.hit_value, 0.0);
    assert!(approx(world.entity(ally).unwrap().hero.total_hp(), 205.0));
}

#[test]
fn test_death_interrupts_active_abilities() {
    let Range {
        mut world, soldier, ..
    } = training_range();

    world.use_ability(soldier, "sprint");
    assert!(world.entity(soldier).unwrap().hero.modifiers.movement.compute() > 1.0);

    world.update_hp(soldier, HpChange::damage(1000.0)).unwrap();
    let entity = world.entity(soldier).unwrap();
    assert!(approx(entity.hero.modifiers.movement.compute(), 1.0));
    assert!(!world.use_ability(soldier, "sprint"));
}

#[test]
fn test_death_while_casting_ultimate_ends_it() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    assert!(world.apply_pickup(soldier, Pickup::UltimateAccelerator));
    assert!(world.activate_ultimate(soldier));
    assert_eq!(
        world.entity(soldier).unwrap().ability("tactical_visor").unwrap().phase,
        AbilityPhase::Casting
    );

    let update = world.update_hp(soldier, HpChange::damage(10_000.0)).unwrap();
    assert!(update.died);
    assert!(!world.entity(soldier).unwrap().hero.ultimate.active);
    assert!(world
        .events()
        .iter()
        .any(|e| matches!(e, GameEvent::UltimateEnded { entity } if *entity == soldier)));

    for _ in 0..10 {
        world.tick(1.0);
    }
    let entity = world.entity(soldier).unwrap();
    assert!(!entity.dead);
    assert!(!entity.hero.ultimate.active);
    assert!(entity.ability("tactical_visor").unwrap().is_ready());

    // Weapon hits earn charge again and the ultimate can be reused
    let update = world
        .apply_weapon_hit(soldier, tank, WeaponHit::at(10.0))
        .unwrap();
    assert!(!update.died);
    assert_eq!(update.progression_to, Some(soldier));
    assert!(world.apply_pickup(soldier, Pickup::UltimateAccelerator));
    assert!(world.activate_ultimate(soldier));
}

#[test]
fn test_downed_barrier_no_longer_blocks() {
    let Range {
        mut world,
        soldier,
        tank,
    } = training_range();

    let barrier = world.add_barrier(100.0, Some(tank));
    assert!(world.hit_barrier(barrier, 150.0));
    assert!(!world.barrier(barrier).unwrap().active);

    let hit = WeaponHit::at(10.0).into_barrier(barrier);
    let update = world.apply_weapon_hit(soldier, tank, hit);
    assert!(update.is_some());
    assert!(!world.entity(tank).unwrap().hero.is_full());

    // Areas see through it as well
    world.update_hp(soldier, HpChange::damage(100.0)).unwrap();
    assert!(world.use_ability(soldier, "biotic_field"));
    world.tick(0.5);
    let area = spawned_area(&world);

    let through = world.apply_area_overlap(
        area,
        Overlap::new(soldier, ColliderId(1), 1.0).obstructed(Some(barrier)),
    );
    assert!(!through.is_rejected());
    assert!(approx(health(&world, soldier), 170.0));

    let standing = world.add_barrier(100.0, None);
    let blocked = world.apply_area_overlap(
        area,
        Overlap::new(soldier, ColliderId(1), 1.0).obstructed(Some(standing)),
    );
    assert_eq!(blocked, AreaOutcome::Rejected(RejectReason::NoLineOfSight));
}
