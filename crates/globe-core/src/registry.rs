//! Live badge set.
//!
//! Textures are produced asynchronously in the browser, so both rebuilds and
//! theme refreshes go through tickets. A build is only swapped in once every
//! slot is filled, which means the renderer sees either the previous complete
//! set or the new complete set. Results that arrive after a newer build or
//! refresh has started are dropped.

use crate::catalog::{badge_total, BadgeSpec, CatalogCycle};
use crate::layout;
use crate::texture::GeneratedTexture;
use crate::theme::ThemeMode;
use glam::{Vec2, Vec3};

/// A positioned, textured billboard.
#[derive(Debug)]
pub struct Badge<T> {
    pub spec: BadgeSpec,
    position: Vec3,
    pub texture: T,
    pub aspect: f32,
    pub mode: ThemeMode,
    /// Billboard size in world units, recomputed every frame.
    pub scale: Vec2,
    /// Recomputed every frame.
    pub opacity: f32,
}

impl<T> Badge<T> {
    /// Fixed for the badge's lifetime.
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// Parameters of a full rebuild.
#[derive(Clone, Copy, Debug)]
pub struct BuildParams {
    pub density: f32,
    pub radius: f32,
    /// Minimum angular separation enforced by relaxation.
    pub min_angle: f32,
    pub relax_iterations: usize,
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("build generation {build} superseded by {latest}")]
pub struct StaleBuild {
    pub build: u64,
    pub latest: u64,
}

/// Slot of a build in progress.
#[derive(Clone, Copy, Debug)]
pub struct BuildSlot {
    pub index: usize,
    pub spec: BadgeSpec,
    pub position: Vec3,
}

/// A rebuild waiting for its textures.
#[derive(Debug)]
pub struct PendingBuild<T> {
    generation: u64,
    mode: ThemeMode,
    slots: Vec<BuildSlot>,
    filled: Vec<Option<GeneratedTexture<T>>>,
    remaining: usize,
}

impl<T> PendingBuild<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn slots(&self) -> &[BuildSlot] {
        &self.slots
    }

    /// Store the texture for `index`. Returns `false` for an unknown index or
    /// a slot that was already filled.
    pub fn fill(&mut self, index: usize, generated: GeneratedTexture<T>) -> bool {
        match self.filled.get_mut(index) {
            Some(slot @ None) => {
                *slot = Some(generated);
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Identifies one theme refresh pass over a committed badge set.
#[derive(Clone, Debug)]
pub struct RefreshTicket {
    pub generation: u64,
    pub epoch: u64,
    pub mode: ThemeMode,
    pub targets: Vec<(usize, BadgeSpec)>,
}

pub struct BadgeRegistry<T> {
    badges: Vec<Badge<T>>,
    live_generation: u64,
    latest_generation: u64,
    refresh_epoch: u64,
}

impl<T> Default for BadgeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BadgeRegistry<T> {
    pub fn new() -> Self {
        Self {
            badges: Vec::new(),
            live_generation: 0,
            latest_generation: 0,
            refresh_epoch: 0,
        }
    }

    pub fn badges(&self) -> &[Badge<T>] {
        &self.badges
    }

    pub fn badges_mut(&mut self) -> &mut [Badge<T>] {
        &mut self.badges
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }

    /// Generation of the committed badge set (0 before the first commit).
    pub fn generation(&self) -> u64 {
        self.live_generation
    }

    /// Generation of the most recently started build.
    pub fn latest_build(&self) -> u64 {
        self.latest_generation
    }

    /// Whether a build newer than the committed set is in flight.
    pub fn build_in_flight(&self) -> bool {
        self.latest_generation != self.live_generation
    }

    /// Start a rebuild: lays out `total = round(len × density)` positions and
    /// assigns catalog entries from `cycle`. Any older pending build becomes
    /// stale.
    pub fn begin_build(&mut self, cycle: &CatalogCycle<'_>, params: &BuildParams) -> PendingBuild<T> {
        self.latest_generation += 1;
        let generation = self.latest_generation;
        if cycle.is_empty() {
            log::warn!("[build] empty catalog; globe will have no badges");
        }
        let total = if cycle.is_empty() {
            0
        } else {
            badge_total(cycle.len(), params.density)
        };
        let positions = layout::layout(total, params.radius, params.min_angle, params.relax_iterations);
        let slots: Vec<BuildSlot> = (0..total)
            .filter_map(|i| {
                cycle.get(i).map(|spec| BuildSlot {
                    index: i,
                    spec,
                    position: positions[i],
                })
            })
            .collect();
        log::info!(
            "[build] generation {} with {} badges (offset {})",
            generation,
            slots.len(),
            cycle.offset()
        );
        let remaining = slots.len();
        PendingBuild {
            generation,
            mode: params.mode,
            filled: (0..remaining).map(|_| None).collect(),
            slots,
            remaining,
        }
    }

    /// Swap in a complete build, releasing the previous badges and their
    /// textures. Returns the number of live badges.
    ///
    /// A build that is incomplete or superseded is rejected and its textures
    /// dropped.
    pub fn commit(&mut self, pending: PendingBuild<T>) -> Result<usize, StaleBuild> {
        if pending.generation != self.latest_generation || !pending.is_complete() {
            log::debug!("[build] discarding generation {}", pending.generation);
            return Err(StaleBuild {
                build: pending.generation,
                latest: self.latest_generation,
            });
        }
        let badges: Vec<Badge<T>> = pending
            .slots
            .into_iter()
            .zip(pending.filled)
            .filter_map(|(slot, tex)| {
                tex.map(|g| Badge {
                    spec: slot.spec,
                    position: slot.position,
                    texture: g.texture,
                    aspect: sanitize_aspect(g.aspect),
                    mode: pending.mode,
                    scale: Vec2::ZERO,
                    opacity: 0.0,
                })
            })
            .collect();
        self.badges = badges;
        self.live_generation = pending.generation;
        // Refreshes aimed at the previous set are no longer valid.
        self.refresh_epoch += 1;
        Ok(self.badges.len())
    }

    /// Start a theme refresh over every live badge.
    pub fn begin_refresh(&mut self, mode: ThemeMode) -> RefreshTicket {
        self.refresh_epoch += 1;
        RefreshTicket {
            generation: self.live_generation,
            epoch: self.refresh_epoch,
            mode,
            targets: self
                .badges
                .iter()
                .enumerate()
                .map(|(i, b)| (i, b.spec))
                .collect(),
        }
    }

    /// Swap one badge's texture. Returns `false` (dropping `generated`) when
    /// the ticket is stale or the badge no longer exists.
    pub fn apply_refresh(&mut self, ticket: &RefreshTicket, index: usize, generated: GeneratedTexture<T>) -> bool {
        if ticket.generation != self.live_generation || ticket.epoch != self.refresh_epoch {
            return false;
        }
        let Some(badge) = self.badges.get_mut(index) else {
            return false;
        };
        badge.texture = generated.texture;
        badge.aspect = sanitize_aspect(generated.aspect);
        badge.mode = ticket.mode;
        true
    }

    /// Synchronous rebuild: `make` is called once per slot.
    pub fn build_with(
        &mut self,
        cycle: &CatalogCycle<'_>,
        params: &BuildParams,
        mut make: impl FnMut(&BadgeSpec, ThemeMode) -> GeneratedTexture<T>,
    ) -> usize {
        let mut pending = self.begin_build(cycle, params);
        let jobs: Vec<BuildSlot> = pending.slots().to_vec();
        for slot in jobs {
            pending.fill(slot.index, make(&slot.spec, params.mode));
        }
        self.commit(pending).unwrap_or(0)
    }

    /// Synchronous refresh of every badge for `mode`.
    pub fn refresh_with(&mut self, mode: ThemeMode, mut make: impl FnMut(&BadgeSpec, ThemeMode) -> GeneratedTexture<T>) {
        let ticket = self.begin_refresh(mode);
        for (index, spec) in &ticket.targets {
            let generated = make(spec, mode);
            self.apply_refresh(&ticket, *index, generated);
        }
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
