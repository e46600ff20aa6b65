use log::debug;
use rand::Rng;
use shared::{GameState, BALL_SPEED, GOAL_LINE, HEIGHT, PADDLE_HEIGHT, WIDTH};

/// Advances the simulation by one tick.
///
/// Order matters: the ball moves first, then the wall bounce, then the left
/// goal check, then the right one. A score recenters the ball immediately,
/// which puts the other goal line out of reach for the rest of the tick, so
/// at most one side can score per tick.
pub fn step(state: &mut GameState, rng: &mut impl Rng) {
    state.ball_x += state.ball_vel_x;
    state.ball_y += state.ball_vel_y;

    // Top and bottom walls flip the vertical velocity. No positional
    // correction; the next tick carries the ball back in bounds.
    if state.ball_y <= 0.0 || state.ball_y >= HEIGHT {
        state.ball_vel_y = -state.ball_vel_y;
    }

    // Left goal line: paddle 1 saves, or player 2 scores.
    if state.ball_x <= GOAL_LINE {
        if state.ball_y >= state.paddle1_y && state.ball_y <= state.paddle1_y + PADDLE_HEIGHT {
            state.ball_vel_x = -state.ball_vel_x;
        } else {
            state.score2 += 1;
            debug!("Player 2 scored ({} - {})", state.score1, state.score2);
            reset_ball(state, rng);
        }
    }

    // Right goal line, same check against paddle 2.
    if state.ball_x >= WIDTH - GOAL_LINE {
        if state.ball_y >= state.paddle2_y && state.ball_y <= state.paddle2_y + PADDLE_HEIGHT {
            state.ball_vel_x = -state.ball_vel_x;
        } else {
            state.score1 += 1;
            debug!("Player 1 scored ({} - {})", state.score1, state.score2);
            reset_ball(state, rng);
        }
    }
}

/// Recenters the ball and redraws both velocity signs, each independently
/// and uniformly from plus or minus full speed.
pub fn reset_ball(state: &mut GameState, rng: &mut impl Rng) {
    state.ball_x = WIDTH / 2.0;
    state.ball_y = HEIGHT / 2.0;
    state.ball_vel_x = if rng.gen_bool(0.5) {
        BALL_SPEED
    } else {
        -BALL_SPEED
    };
    state.ball_vel_y = if rng.gen_bool(0.5) {
        BALL_SPEED
    } else {
        -BALL_SPEED
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::{Direction, PaddleSide};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_one_tick_from_center() {
        let mut state = GameState::new();

        step(&mut state, &mut rng());

        assert_approx_eq!(state.ball_x, 301.5);
        assert_approx_eq!(state.ball_y, 226.5);
        assert_approx_eq!(state.ball_vel_x, BALL_SPEED);
        assert_approx_eq!(state.ball_vel_y, BALL_SPEED);
        assert_eq!(state.score1, 0);
        assert_eq!(state.score2, 0);
    }

    #[test]
    fn test_bounce_off_top_wall() {
        let mut state = GameState::new();
        state.ball_y = 1.0;
        state.ball_vel_y = -BALL_SPEED;

        step(&mut state, &mut rng());

        // Ball crossed the top edge, vertical velocity flipped, horizontal
        // velocity untouched.
        assert!(state.ball_y <= 0.0);
        assert_approx_eq!(state.ball_vel_y, BALL_SPEED);
        assert_approx_eq!(state.ball_vel_x, BALL_SPEED);
    }

    #[test]
    fn test_bounce_off_bottom_wall() {
        let mut state = GameState::new();
        state.ball_y = HEIGHT - 1.0;
        state.ball_vel_y = BALL_SPEED;

        step(&mut state, &mut rng());

        assert!(state.ball_y >= HEIGHT);
        assert_approx_eq!(state.ball_vel_y, -BALL_SPEED);
    }

    #[test]
    fn test_no_bounce_midfield() {
        let mut state = GameState::new();
        let vel_y = state.ball_vel_y;

        for _ in 0..10 {
            step(&mut state, &mut rng());
        }

        assert_approx_eq!(state.ball_vel_y, vel_y);
    }

    #[test]
    fn test_paddle_one_saves() {
        let mut state = GameState::new();
        state.ball_x = GOAL_LINE + 1.0;
        state.ball_y = state.paddle1_y + PADDLE_HEIGHT / 2.0;
        state.ball_vel_x = -BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_approx_eq!(state.ball_vel_x, BALL_SPEED);
        assert_eq!(state.score2, 0);
    }

    #[test]
    fn test_paddle_two_saves() {
        let mut state = GameState::new();
        state.ball_x = WIDTH - GOAL_LINE - 1.0;
        state.ball_y = state.paddle2_y + PADDLE_HEIGHT / 2.0;
        state.ball_vel_x = BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_approx_eq!(state.ball_vel_x, -BALL_SPEED);
        assert_eq!(state.score1, 0);
    }

    #[test]
    fn test_save_is_inclusive_at_paddle_edges() {
        // Ball exactly level with the bottom edge of the paddle still counts
        // as a save.
        let mut state = GameState::new();
        state.ball_x = GOAL_LINE + 1.0;
        state.ball_y = state.paddle1_y + PADDLE_HEIGHT;
        state.ball_vel_x = -BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_approx_eq!(state.ball_vel_x, BALL_SPEED);
        assert_eq!(state.score2, 0);
    }

    #[test]
    fn test_miss_on_left_scores_player_two() {
        let mut state = GameState::new();
        state.ball_x = GOAL_LINE + 1.0;
        state.ball_y = 10.0;
        state.paddle1_y = 200.0;
        state.ball_vel_x = -BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_eq!(state.score2, 1);
        assert_eq!(state.score1, 0);
        // Scoring immediately resets the ball to the exact center.
        assert_approx_eq!(state.ball_x, WIDTH / 2.0);
        assert_approx_eq!(state.ball_y, HEIGHT / 2.0);
    }

    #[test]
    fn test_miss_on_right_scores_player_one() {
        let mut state = GameState::new();
        state.ball_x = WIDTH - GOAL_LINE - 1.0;
        state.ball_y = 10.0;
        state.paddle2_y = 200.0;
        state.ball_vel_x = BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_eq!(state.score1, 1);
        assert_eq!(state.score2, 0);
        assert_approx_eq!(state.ball_x, WIDTH / 2.0);
        assert_approx_eq!(state.ball_y, HEIGHT / 2.0);
    }

    #[test]
    fn test_at_most_one_score_per_tick() {
        // Park the ball past the left goal line with both paddles out of the
        // way; the reset recenters it before the right check runs.
        let mut state = GameState::new();
        state.ball_x = 0.0;
        state.ball_y = 10.0;
        state.paddle1_y = 200.0;
        state.paddle2_y = 200.0;
        state.ball_vel_x = -BALL_SPEED;
        state.ball_vel_y = 0.0;

        step(&mut state, &mut rng());

        assert_eq!(state.score1 + state.score2, 1);
    }

    #[test]
    fn test_reset_ball_keeps_speed_magnitude() {
        for seed in 0..16 {
            let mut state = GameState::new();
            let mut rng = StdRng::seed_from_u64(seed);

            reset_ball(&mut state, &mut rng);

            assert_approx_eq!(state.ball_vel_x.abs(), BALL_SPEED);
            assert_approx_eq!(state.ball_vel_y.abs(), BALL_SPEED);
            assert_approx_eq!(state.ball_x, WIDTH / 2.0);
            assert_approx_eq!(state.ball_y, HEIGHT / 2.0);
        }
    }

    #[test]
    fn test_reset_ball_covers_all_four_directions() {
        let mut seen = std::collections::HashSet::new();

        for seed in 0..64 {
            let mut state = GameState::new();
            let mut rng = StdRng::seed_from_u64(seed);
            reset_ball(&mut state, &mut rng);
            seen.insert((state.ball_vel_x > 0.0, state.ball_vel_y > 0.0));
        }

        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_scores_never_decrease() {
        let mut state = GameState::new();
        let mut rng = rng();
        let mut last = (0, 0);

        // Let the ball rally unattended for a while; the paddles wander so
        // both saves and misses occur.
        for i in 0..5_000 {
            if i % 3 == 0 {
                state.move_paddle(PaddleSide::One, Direction::Up);
            } else {
                state.move_paddle(PaddleSide::Two, Direction::Down);
            }

            step(&mut state, &mut rng);

            assert!(state.score1 >= last.0);
            assert!(state.score2 >= last.1);
            assert!(state.score1 + state.score2 <= last.0 + last.1 + 1);
            last = (state.score1, state.score2);
        }

        assert!(
            last.0 + last.1 > 0,
            "expected at least one goal in 5000 ticks"
        );
    }

    #[test]
    fn test_speed_magnitude_constant_between_resets() {
        let mut state = GameState::new();
        let mut rng = rng();

        for _ in 0..1_000 {
            step(&mut state, &mut rng);
            assert_approx_eq!(state.ball_vel_x.abs(), BALL_SPEED);
            assert_approx_eq!(state.ball_vel_y.abs(), BALL_SPEED);
        }
    }
}
