//! Cart-pole dynamics: accelerations and the explicit Euler step.
//!
//! Pure functions of the physical state and constants; no hidden state.
//! There is no bounds or stability checking — large steps or extreme
//! forces diverge, and that is accepted behavior.

use cartpole_core::{CartPoleParams, CartPoleState};

/// Angular acceleration of the pole from the Newton-Euler cart-pole
/// equation:
///
/// ```text
///          m*g*sin(th) - cos(th) * (F + mb*l*th_dot^2*sin(th))
/// th_dd = ---------------------------------------------------
///                 (4/3)*m*l - mb*l*cos(th)^2
/// ```
///
/// where `m` is the combined mass, `mb` the pole mass, and `l` the pole
/// half-length.
pub fn angular_acceleration(state: &CartPoleState, params: &CartPoleParams) -> f64 {
    let sin = state.angle.sin();
    let cos = state.angle.cos();
    let pole_torque = state.force
        + params.pole_mass * params.half_length * state.angle_dot * state.angle_dot * sin;
    (params.total_mass * params.gravity * sin - cos * pole_torque)
        / ((4.0 / 3.0) * params.total_mass * params.half_length
            - params.pole_mass * params.half_length * cos * cos)
}

/// Horizontal acceleration of the cart given the angular acceleration just
/// computed for this tick:
///
/// ```text
/// x_dd = (F + mb*l*th_dot^2*sin(th) - th_dd*cos(th)) / m
/// ```
pub fn horizontal_acceleration(
    state: &CartPoleState,
    params: &CartPoleParams,
    angular_accel: f64,
) -> f64 {
    let sin = state.angle.sin();
    let cos = state.angle.cos();
    (state.force + params.pole_mass * params.half_length * (state.angle_dot * state.angle_dot) * sin
        - angular_accel * cos)
        / params.total_mass
}

/// Advances the state one fixed time step under `force`.
///
/// Euler update in the reference ordering: each rate is integrated from its
/// acceleration first, then the position is integrated from the *new* rate.
/// Angular degree of freedom first, then horizontal.
pub fn step(state: &CartPoleState, params: &CartPoleParams, force: f64, dt: f64) -> CartPoleState {
    let mut prev = *state;
    prev.force = force;

    let angle_accel = angular_acceleration(&prev, params);
    let angle_dot = prev.angle_dot + dt * angle_accel;
    let angle = prev.angle + dt * angle_dot;

    let x_accel = horizontal_acceleration(&prev, params, angle_accel);
    let x_dot = prev.x_dot + dt * x_accel;
    let x = prev.x + dt * x_dot;

    CartPoleState {
        x,
        x_dot,
        x_accel,
        angle,
        angle_dot,
        angle_accel,
        force,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference time step.
    const DT: f64 = 0.002;

    fn plant() -> CartPoleParams {
        CartPoleParams::default()
    }

    // ---- Accelerations ----

    #[test]
    fn equilibrium_has_zero_accelerations() {
        let state = CartPoleState::default();
        let ang = angular_acceleration(&state, &plant());
        assert_eq!(ang, 0.0);
        assert_eq!(horizontal_acceleration(&state, &plant(), ang), 0.0);
    }

    #[test]
    fn gravity_pulls_a_displaced_pole_further_over() {
        // Small positive angle, no force: the pole falls toward positive.
        let state = CartPoleState::with_angle(0.1);
        assert!(angular_acceleration(&state, &plant()) > 0.0);
        let state = CartPoleState::with_angle(-0.1);
        assert!(angular_acceleration(&state, &plant()) < 0.0);
    }

    #[test]
    fn positive_force_pushes_the_pole_back() {
        let mut state = CartPoleState::with_angle(0.1);
        let unforced = angular_acceleration(&state, &plant());
        state.force = 30.0;
        let forced = angular_acceleration(&state, &plant());
        assert!(forced < unforced, "{forced} should be below {unforced}");
    }

    #[test]
    fn upright_pole_accelerates_the_cart_with_the_force() {
        let mut state = CartPoleState::default();
        state.force = 11.0;
        let ang = angular_acceleration(&state, &plant());
        let x_dd = horizontal_acceleration(&state, &plant(), ang);
        // Upright: sin = 0, cos = 1, so x_dd reduces to (F - th_dd) / m.
        assert!(x_dd > 0.0);
        assert!((x_dd - (11.0 - ang) / plant().total_mass).abs() < 1e-12);
    }

    // ---- Euler step ----

    #[test]
    fn equilibrium_is_a_fixed_point() {
        let state = CartPoleState::default();
        let next = step(&state, &plant(), 0.0, DT);
        assert_eq!(next, state);
    }

    #[test]
    fn step_records_the_applied_force() {
        let next = step(&CartPoleState::default(), &plant(), 7.0, DT);
        assert_eq!(next.force, 7.0);
    }

    #[test]
    fn rates_integrate_before_positions() {
        // One step from rest under force: the new position must already
        // include the new rate, not the old zero rate.
        let next = step(&CartPoleState::default(), &plant(), 10.0, DT);
        assert!(next.x_dot != 0.0);
        assert_eq!(next.x, DT * next.x_dot);
        assert_eq!(next.angle, DT * next.angle_dot);
    }

    #[test]
    fn step_is_deterministic() {
        let state = CartPoleState::with_angle(0.05);
        let a = step(&state, &plant(), 3.0, DT);
        let b = step(&state, &plant(), 3.0, DT);
        assert_eq!(a, b);
    }

    #[test]
    fn small_step_displacement_matches_hand_integration() {
        let state = CartPoleState::with_angle(0.1);
        let mut expected = state;
        expected.force = 0.0;
        let ang = angular_acceleration(&expected, &plant());
        let next = step(&state, &plant(), 0.0, DT);
        assert!((next.angle_dot - DT * ang).abs() < 1e-15);
        assert!((next.angle - (0.1 + DT * next.angle_dot)).abs() < 1e-15);
    }

    #[test]
    fn unforced_pole_falls_without_any_bounds_check() {
        // No stability or range check: left alone, the pole simply falls
        // past any bound. Documents the accepted divergence non-goal.
        let mut state = CartPoleState::with_angle(0.1);
        for _ in 0..2000 {
            state = step(&state, &plant(), 0.0, DT);
        }
        assert!(state.angle.abs() > 1.0, "pole should have fallen, angle {}", state.angle);
        assert!(state.angle.is_finite());
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn angle() -> impl Strategy<Value = f64> {
            -1.0_f64..1.0
        }

        fn force() -> impl Strategy<Value = f64> {
            -60.0_f64..60.0
        }

        proptest! {
            #[test]
            fn accelerations_are_finite(theta in angle(), theta_dot in angle(), f in force()) {
                let state = CartPoleState {
                    angle: theta,
                    angle_dot: theta_dot,
                    force: f,
                    ..CartPoleState::default()
                };
                let ang = angular_acceleration(&state, &plant());
                prop_assert!(ang.is_finite());
                prop_assert!(horizontal_acceleration(&state, &plant(), ang).is_finite());
            }

            #[test]
            fn dynamics_are_odd_in_state_and_force(theta in angle(), theta_dot in angle(), f in force()) {
                let state = CartPoleState {
                    angle: theta,
                    angle_dot: theta_dot,
                    force: f,
                    ..CartPoleState::default()
                };
                let mirrored = CartPoleState {
                    angle: -theta,
                    angle_dot: -theta_dot,
                    force: -f,
                    ..CartPoleState::default()
                };
                let ang = angular_acceleration(&state, &plant());
                let mirrored_ang = angular_acceleration(&mirrored, &plant());
                prop_assert!((ang + mirrored_ang).abs() < 1e-9);
            }

            #[test]
            fn zero_dt_is_identity_up_to_force(theta in angle(), f in force()) {
                let state = CartPoleState::with_angle(theta);
                let next = step(&state, &plant(), f, 0.0);
                prop_assert_eq!(next.x, state.x);
                prop_assert_eq!(next.x_dot, state.x_dot);
                prop_assert_eq!(next.angle, state.angle);
                prop_assert_eq!(next.angle_dot, state.angle_dot);
                prop_assert_eq!(next.force, f);
            }
        }
    }
}
