//! Fixed timestep simulation tick
//!
//! `advance_frame` is called once per animation frame. It applies the frame's
//! input, banks the elapsed time and drains whole ticks. Every tick runs the
//! same fixed pipeline:
//!
//! trail record -> serpent move -> demons -> boss -> collision resolve

use super::collision::{Arena, Collision, detect};
use super::grid::Heading;
use super::state::{GameEvent, GamePhase, GameState};

/// Input resolved for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Requested heading (held direction key)
    pub heading: Option<Heading>,
    /// Pause toggle edge
    pub pause: bool,
    /// Restart edge (only honoured after game over)
    pub restart: bool,
}

/// Advance the session by one animation frame.
///
/// Returns the number of simulation ticks run. The restart edge is left to the
/// caller because a new run needs a fresh seed.
pub fn advance_frame(state: &mut GameState, input: &FrameInput, timestamp_ms: f64) -> u32 {
    // Timestamps are tracked in every phase so resuming never bursts
    let elapsed_ms = state.clock.observe(timestamp_ms);

    if input.pause {
        state.toggle_pause();
    }

    if let Some(heading) = input.heading {
        if matches!(state.phase, GamePhase::Running | GamePhase::Paused) {
            state.serpent.steer(heading);
        }
    }

    if state.phase != GamePhase::Running {
        return 0;
    }

    state.clock.accumulate(elapsed_ms);

    let mut ticks = 0;
    while state.phase == GamePhase::Running
        && state.tuning.max_ticks_per_frame.is_none_or(|cap| ticks < cap)
        && state.clock.try_consume(state.tick_rate)
    {
        tick(state, elapsed_ms);
        ticks += 1;
    }

    if state.phase == GamePhase::Running {
        state.fx.update(elapsed_ms as f32);
    }

    ticks
}

/// Advance the simulation by one tick.
///
/// `elapsed_ms` is the duration of the frame this tick was drained in; demons
/// and the boss pace themselves against it.
pub fn tick(state: &mut GameState, elapsed_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    state.trail.record(state.serpent.head());
    state.serpent.advance();
    state.demons.advance(elapsed_ms, state.tick_rate);

    if let Some(boss) = state.boss.as_mut() {
        let head = state.serpent.head();
        boss.advance(
            elapsed_ms,
            state.tick_rate,
            &state.trail,
            head,
            &state.grid,
            &mut state.rng,
        );
    }

    let hit = detect(&Arena {
        grid: &state.grid,
        serpent: &state.serpent,
        demons: &state.demons,
        boss: state.boss.as_ref(),
        orb: state.orb,
    });

    match hit {
        Some(Collision::Orb) => feed(state),
        Some(collision) => {
            log::debug!("Tick {}: {:?} at {}", state.time_ticks, collision, state.serpent.head());
            state.game_over();
        }
        None => {}
    }
}

/// Consume the orb: grow, score, spawn a demon, maybe wake the boss and speed up
fn feed(state: &mut GameState) {
    let head = state.serpent.head();

    state.score += state.tuning.score_per_orb;
    state.feeds += 1;
    state.serpent.grow();

    state.demons.spawn(
        &state.trail,
        state.tuning.demon_trail_length,
        state.tuning.demon_speed_factor,
    );
    state.fx.burst_at_cell(head.x, head.y);
    state.emit(GameEvent::DemonSpawn);

    if state.boss.is_none() && state.feeds >= state.tuning.boss_feed_threshold {
        spawn_boss(state);
    }

    if state.feeds % state.tuning.feeds_per_speedup == 0 {
        state.tick_rate += state.tuning.tick_rate_step;
        log::debug!("Speed up to {} ticks/s", state.tick_rate);
    }

    state.orb = state.free_cell();
    match state.orb {
        Some(orb) => state.fx.burst_at_cell(orb.x, orb.y),
        None => log::warn!("No free cell left for the orb"),
    }
    state.emit(GameEvent::Pickup);

    log::debug!(
        "Feed #{} at {}: score {}, {} demons",
        state.feeds,
        head,
        state.score,
        state.demons.len()
    );
}

fn spawn_boss(state: &mut GameState) {
    let Some(pos) = state.free_cell() else {
        log::warn!("No free cell to spawn the boss");
        return;
    };
    state.boss = Some(super::boss::Boss::new(
        pos,
        state.tuning.boss_speed_factor,
        state.tuning.boss_intercept_chance,
    ));
    state.emit(GameEvent::BossSpawn);
    log::info!("Boss spawned at {} after {} feeds", pos, state.feeds);
}
