//! Rotation scheduler: user drag, post-release momentum and diagonal
//! autorotation, with exactly one of them driving the globe at a time.

use crate::config::SpeedProfile;
use crate::constants::*;
use std::f32::consts::{PI, TAU};

/// Autorotation diagonals as `(yaw sign, pitch sign)`, visited in order.
pub const DIAGONALS: [(f32, f32); 4] = [(1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0)];

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let w = a.rem_euclid(TAU);
    if w > PI {
        w - TAU
    } else {
        w
    }
}

/// Which source is driving rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    Dragging,
    Coasting,
    IdleAutorotating,
}

/// Snapshot of the globe orientation and the scheduler bookkeeping.
///
/// Velocities are radians per 60 Hz frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationState {
    pub yaw: f32,
    pub pitch: f32,
    pub velocity_yaw: f32,
    pub velocity_pitch: f32,
    pub dragging: bool,
    pub user_active: bool,
    pub phase_index: usize,
    pub phase_elapsed: f32,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            velocity_yaw: 0.0,
            velocity_pitch: 0.0,
            dragging: false,
            user_active: false,
            phase_index: 0,
            phase_elapsed: 0.0,
        }
    }
}

/// Index of the diagonal best aligned with a release velocity, or `None` when
/// the velocity is negligible on both axes.
pub fn snap_phase(velocity_yaw: f32, velocity_pitch: f32) -> Option<usize> {
    if velocity_yaw.abs() < MOMENTUM_STOP_THRESHOLD && velocity_pitch.abs() < MOMENTUM_STOP_THRESHOLD {
        return None;
    }
    let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };
    let (sy, sp) = (sign(velocity_yaw), sign(velocity_pitch));
    let mut best = 0;
    let mut best_dot = f32::NEG_INFINITY;
    for (i, (dy, dp)) in DIAGONALS.iter().enumerate() {
        let dot = dy * sy + dp * sp;
        if dot > best_dot {
            best_dot = dot;
            best = i;
        }
    }
    Some(best)
}

pub struct RotationController {
    state: RotationState,
    mode: RotationMode,
    profile: SpeedProfile,
    last_pointer: (f32, f32),
    since_release: f32,
    release_velocity: (f32, f32),
}

impl RotationController {
    pub fn new(profile: SpeedProfile) -> Self {
        Self {
            state: RotationState::default(),
            mode: RotationMode::IdleAutorotating,
            profile,
            last_pointer: (0.0, 0.0),
            since_release: 0.0,
            release_velocity: (0.0, 0.0),
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Start dragging at `(x, y)` CSS pixels. Interrupts momentum and
    /// autorotation; the velocity estimate starts from zero.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.mode = RotationMode::Dragging;
        self.last_pointer = (x, y);
        let s = &mut self.state;
        s.dragging = true;
        s.user_active = true;
        s.velocity_yaw = 0.0;
        s.velocity_pitch = 0.0;
    }

    /// Follow the pointer while dragging; ignored otherwise.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.mode != RotationMode::Dragging {
            return;
        }
        let (dx, dy) = (x - self.last_pointer.0, y - self.last_pointer.1);
        self.last_pointer = (x, y);
        let k = self.profile.drag_sensitivity;
        let s = &mut self.state;
        s.yaw = wrap_angle(s.yaw + dx * k);
        s.pitch = wrap_angle(s.pitch + dy * k);
        s.velocity_yaw = dx * k * DRAG_VELOCITY_CARRY;
        s.velocity_pitch = dy * k * DRAG_VELOCITY_CARRY;
    }

    /// End the drag and start coasting on the last velocity estimate.
    pub fn pointer_up(&mut self) {
        if self.mode != RotationMode::Dragging {
            return;
        }
        self.mode = RotationMode::Coasting;
        self.state.dragging = false;
        self.since_release = 0.0;
        self.release_velocity = (self.state.velocity_yaw, self.state.velocity_pitch);
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.mode {
            RotationMode::Dragging => {}
            RotationMode::Coasting => self.coast(dt),
            RotationMode::IdleAutorotating => self.autorotate(dt),
        }
        self.state.yaw = wrap_angle(self.state.yaw);
        self.state.pitch = wrap_angle(self.state.pitch);
    }

    fn coast(&mut self, dt: f32) {
        let frames = dt * MOMENTUM_REFERENCE_HZ;
        let damping = self.profile.momentum_damping.clamp(0.0, 1.0);
        let decay = damping.powf(frames);
        // Sum of the per-frame steps over `frames` reference frames.
        let travel = if damping < 1.0 {
            (1.0 - decay) / (1.0 - damping)
        } else {
            frames
        };
        let s = &mut self.state;
        s.yaw += s.velocity_yaw * travel;
        s.pitch += s.velocity_pitch * travel;
        s.velocity_yaw *= decay;
        s.velocity_pitch *= decay;
        self.since_release += dt;

        let settled = s.velocity_yaw.hypot(s.velocity_pitch) < MOMENTUM_STOP_THRESHOLD;
        if self.since_release >= RELEASE_GRACE_SEC && settled {
            self.resume_autorotation();
        }
    }

    fn resume_autorotation(&mut self) {
        let (vy, vp) = self.release_velocity;
        if let Some(phase) = snap_phase(vy, vp) {
            log::debug!("[rotation] resuming on diagonal {}", phase);
            self.state.phase_index = phase;
            self.state.phase_elapsed = 0.0;
        }
        self.state.velocity_yaw = 0.0;
        self.state.velocity_pitch = 0.0;
        self.state.user_active = false;
        self.mode = RotationMode::IdleAutorotating;
    }

    fn autorotate(&mut self, dt: f32) {
        let (sy, sp) = DIAGONALS[self.state.phase_index % DIAGONALS.len()];
        let speed = self.profile.angular_speed;
        let s = &mut self.state;
        s.yaw += speed * sy * dt;
        s.pitch += speed * sp * dt;
        s.phase_elapsed += dt;
        if s.phase_elapsed >= self.profile.phase_duration {
            s.phase_elapsed = 0.0;
            s.phase_index = (s.phase_index + 1) % DIAGONALS.len();
        }
    }
}
