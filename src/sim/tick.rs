//! Per-frame simulation tick
//!
//! One call advances the session by exactly one rendered frame. Velocities are
//! in pixels per frame.

use super::collision::{circle_hits_rect, span_offset};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::constrain;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x in canvas pixels (None until the pointer is seen)
    pub pointer_x: Option<f32>,
    /// Restart requested (button click). Drained at the start of the tick.
    pub restart: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Commands first, so a restart never lands mid-frame
    if input.restart {
        if state.phase.is_terminal() {
            state.reset();
            state.events.push(GameEvent::Restarted);
            log::info!("Restarted (restart #{})", state.restarts);
        } else {
            log::debug!("Ignoring restart request while playing");
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if let Some(x) = input.pointer_x {
        state.paddle.track(x);
    }

    state.ball.integrate(state.tuning.rotation_coupling);

    bounce_walls(state);
    bounce_paddle(state);
    hit_obstacles(state);
    check_terminal(state);
}

fn bounce_walls(state: &mut GameState) {
    let ball = &mut state.ball;
    if ball.pos.x < ball.radius || ball.pos.x > CANVAS_WIDTH - ball.radius {
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }
    // Bottom is open; falling through it is the lose condition
    if ball.pos.y < ball.radius {
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }
}

fn bounce_paddle(state: &mut GameState) {
    let paddle = &state.paddle;
    let ball = &mut state.ball;

    // Only a falling ball bounces, so it cannot be caught twice on the way up
    if !(ball.bottom() > paddle.top() && paddle.spans(ball.pos.x) && ball.vel.y > 0.0) {
        return;
    }

    let offset = span_offset(ball.pos.x, paddle.pos.x, paddle.width);
    ball.vel.x = offset * ball.max_speed;
    ball.vel.y = -ball.vel.y.abs();
    ball.vel *= state.tuning.paddle_boost;
    ball.vel.x = constrain(ball.vel.x, -ball.max_speed, ball.max_speed);
    ball.vel.y = constrain(ball.vel.y, -ball.max_speed, -state.tuning.min_rebound_speed);

    // Edge hits spin the ball harder
    ball.angle += offset * ball.spin;

    state.events.push(GameEvent::PaddleHit { offset });
}

fn hit_obstacles(state: &mut GameState) {
    // Reverse order keeps indices valid across removals
    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &state.obstacles[i];
        if !circle_hits_rect(state.ball.pos, state.ball.radius, obstacle.pos, obstacle.size) {
            continue;
        }

        let obstacle = state.obstacles.remove(i);
        state.ball.vel.y = -state.ball.vel.y;
        state.score += 1;
        state.ball.boost(state.tuning.obstacle_boost);
        state.events.push(GameEvent::ObstacleDestroyed {
            pos: obstacle.pos,
            variant: obstacle.variant,
        });
    }
}

fn check_terminal(state: &mut GameState) {
    // Win is checked first; a frame that also drops the ball still wins
    if state.obstacles.is_empty() && state.phase == GamePhase::Playing {
        state.phase = GamePhase::Win;
        state.show_restart_control();
        state.events.push(GameEvent::Won { score: state.score });
        log::info!("Field cleared with score {}", state.score);
        return;
    }

    if state.ball.top() > CANVAS_HEIGHT {
        state.phase = GamePhase::Lose;
        state.show_restart_control();
        state.events.push(GameEvent::Lost { score: state.score });
        log::info!("Ball lost with score {}", state.score);
    }
}
