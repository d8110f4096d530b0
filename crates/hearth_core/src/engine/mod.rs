//! # Engine
//!
//! Composition of one [`EntityManager`] and one [`SystemManager`], driving
//! every registered system through setup, ticks and teardown.
//!
//! ## Lifecycle
//!
//! ```text
//! ┌───────────────┐  setup()  ┌────────┐  teardown()  ┌───────────┐
//! │ Uninitialized │──────────▶│ Active │─────────────▶│ Finalized │
//! └───────────────┘           └────────┘              └───────────┘
//!                              tick() / run()
//! ```
//!
//! `setup` and `teardown` reach every system, paused or not, exactly once.
//! `tick` runs every non-paused system once, in registration order. A system
//! registered or removed while the engine is active is set up or torn down
//! on the spot by [`Engine::add_system`] and [`Engine::remove_system`].
//!
//! ## Stopping
//!
//! The engine owns no stop flag of its own. A run ends when a system
//! returns [`Signal::RequestStop`], when a [`ControlMessage::Stop`] arrives
//! through a [`ControlSender`], or when the configured tick limit is
//! reached. The tick in which a stop is requested always completes.

mod control;
mod tick;

pub use control::{ControlMessage, ControlSender};
pub use tick::{TickLoop, TickStats};

use std::fmt;
use std::time::{Duration, Instant};

use control::ControlChannel;

use crate::config::EngineConfig;
use crate::ecs::{EntityManager, Signal, System, SystemManager};
use crate::error::{EcsError, EcsResult};

/// Lifecycle phase of an [`Engine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Systems have not been set up yet.
    Uninitialized,
    /// Systems are set up and may be ticked.
    Active,
    /// Systems have been torn down. Terminal.
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Finalized => "finalized",
        })
    }
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// 1-based number of this tick over the engine's lifetime.
    pub tick: u64,
    /// Systems whose `process` ran.
    pub processed: usize,
    /// Systems skipped because they were paused.
    pub skipped: usize,
    /// A stop was requested during this tick.
    pub stop_requested: bool,
    /// Wall time spent in the tick.
    pub elapsed: Duration,
}

/// What happened during one call to [`Engine::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed by this run.
    pub ticks: u64,
    /// `true` if the run ended on a stop request rather than the tick limit.
    pub stopped_by_request: bool,
}

/// Drives the systems of a [`SystemManager`] over an [`EntityManager`].
#[derive(Debug)]
pub struct Engine {
    entities: EntityManager,
    systems: SystemManager,
    config: EngineConfig,
    /// Target tick duration, if the configuration sets a tick rate.
    budget: Option<Duration>,
    control: ControlChannel,
    phase: Phase,
    tick_count: u64,
    stats: TickStats,
}

impl Engine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(entities: EntityManager, systems: SystemManager) -> Self {
        let config = EngineConfig::default();
        Self {
            entities,
            systems,
            control: ControlChannel::new(config.control_capacity),
            budget: None,
            config,
            phase: Phase::Uninitialized,
            tick_count: 0,
            stats: TickStats::default(),
        }
    }

    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn with_config(
        entities: EntityManager,
        systems: SystemManager,
        config: EngineConfig,
    ) -> EcsResult<Self> {
        config.validate()?;
        Ok(Self {
            control: ControlChannel::new(config.control_capacity),
            budget: config.tick_rate.map(tick::tick_duration),
            config,
            ..Self::new(entities, systems)
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Calls `setup` on every system, in registration order, paused or not.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Lifecycle`] unless the engine is uninitialized.
    pub fn setup(&mut self) -> EcsResult<()> {
        self.expect_phase(Phase::Uninitialized, "setup")?;

        tracing::info!(systems = self.systems.len(), "setting up systems");
        for (system, _) in self.systems.systems_mut() {
            system.setup();
        }

        self.phase = Phase::Active;
        Ok(())
    }

    /// Runs one tick.
    ///
    /// Pending control messages are applied first. Then every system that
    /// is not paused processes the shared entity manager, in registration
    /// order. A system returning [`Signal::RequestPause`] is paused right
    /// after its `process` returns; [`Signal::RequestStop`] is reported in
    /// the outcome once every remaining system has run.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Lifecycle`] unless the engine is active.
    pub fn tick(&mut self) -> EcsResult<TickOutcome> {
        self.expect_phase(Phase::Active, "tick")?;

        let start = Instant::now();
        let mut stop_requested = self.apply_control_messages();
        let mut processed = 0;
        let mut skipped = 0;

        for position in 0..self.systems.len() {
            let Some((system, paused)) = self.systems.slot_mut(position) else {
                break;
            };
            if paused {
                skipped += 1;
                continue;
            }

            let signal = system.process(&mut self.entities);
            processed += 1;

            match signal {
                Signal::Continue => {}
                Signal::RequestPause => {
                    tracing::debug!(system = system.name(), "system requested pause");
                    self.systems.pause_at(position);
                }
                Signal::RequestStop => {
                    tracing::debug!(system = system.name(), "system requested stop");
                    stop_requested = true;
                }
            }
        }

        let elapsed = start.elapsed();
        self.stats.record(elapsed, self.budget);
        self.tick_count += 1;

        tracing::trace!(
            tick = self.tick_count,
            processed,
            skipped,
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "tick complete"
        );

        Ok(TickOutcome {
            tick: self.tick_count,
            processed,
            skipped,
            stop_requested,
            elapsed,
        })
    }

    /// Ticks until a stop is requested or the configured tick limit is hit.
    ///
    /// With a configured tick rate, ticks are paced to that rate; otherwise
    /// they run back to back. Without a tick limit the loop only ends on a
    /// stop request.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Lifecycle`] unless the engine is active.
    pub fn run(&mut self) -> EcsResult<RunSummary> {
        self.expect_phase(Phase::Active, "run")?;

        tracing::info!(
            systems = self.systems.len(),
            tick_rate = ?self.config.tick_rate,
            max_ticks = ?self.config.max_ticks,
            "run loop started"
        );

        let mut pacer = self.config.tick_rate.map(TickLoop::new);
        let mut summary = RunSummary {
            ticks: 0,
            stopped_by_request: false,
        };

        while self.config.max_ticks.map_or(true, |max| summary.ticks < max) {
            if let Some(pacer) = pacer.as_mut() {
                pacer.wait_for_next_tick();
            }

            let outcome = self.tick()?;
            summary.ticks += 1;

            if outcome.stop_requested {
                summary.stopped_by_request = true;
                break;
            }
        }

        tracing::info!(
            ticks = summary.ticks,
            stopped_by_request = summary.stopped_by_request,
            "run loop finished"
        );
        Ok(summary)
    }

    /// Calls `teardown` on every system, in registration order, paused or
    /// not.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Lifecycle`] unless the engine is active.
    pub fn teardown(&mut self) -> EcsResult<()> {
        self.expect_phase(Phase::Active, "teardown")?;

        tracing::info!(
            systems = self.systems.len(),
            ticks = self.tick_count,
            "tearing down systems"
        );
        for (system, _) in self.systems.systems_mut() {
            system.teardown();
        }

        self.phase = Phase::Finalized;
        Ok(())
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> EcsResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EcsError::Lifecycle {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Applies queued control messages. Returns `true` if one was a stop.
    fn apply_control_messages(&mut self) -> bool {
        let mut stop = false;
        for message in self.control.drain() {
            match message {
                ControlMessage::Pause(name) => {
                    if self.systems.pause(&name) {
                        tracing::debug!(system = %name, "paused by control message");
                    }
                }
                ControlMessage::Resume(name) => {
                    if self.systems.resume(&name) {
                        tracing::debug!(system = %name, "resumed by control message");
                    }
                }
                ControlMessage::Stop => {
                    tracing::debug!("stop requested by control message");
                    stop = true;
                }
            }
        }
        stop
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a system, replacing any system with the same name.
    ///
    /// Before setup this is plain registration. While the engine is active
    /// the replaced system, if any, is torn down and the new one is set up
    /// before it is stored, so it never processes without setup.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::Lifecycle`] once the engine is finalized.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> EcsResult<()> {
        let mut system: Box<dyn System> = Box::new(system);

        match self.phase {
            Phase::Uninitialized => {}
            Phase::Active => {
                if let Some(old) = self.systems.get_mut(system.name()) {
                    tracing::debug!(system = old.name(), "tearing down replaced system");
                    old.teardown();
                }
                tracing::debug!(system = system.name(), "setting up late system");
                system.setup();
            }
            Phase::Finalized => {
                return Err(EcsError::Lifecycle {
                    operation: "add a system",
                    phase: self.phase,
                });
            }
        }

        self.systems.insert(system);
        Ok(())
    }

    /// Unregisters a system and returns it.
    ///
    /// A system removed while the engine is active is torn down first.
    pub fn remove_system(&mut self, name: &str) -> Option<Box<dyn System>> {
        let mut system = self.systems.remove(name)?;
        if self.phase == Phase::Active {
            tracing::debug!(system = name, "tearing down removed system");
            system.teardown();
        }
        Some(system)
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Pauses the named system. Unknown names are ignored; the return value
    /// tells whether the name was registered.
    pub fn pause_system(&mut self, name: &str) -> bool {
        self.systems.pause(name)
    }

    /// Resumes the named system. Unknown names are ignored; the return value
    /// tells whether the name was registered.
    pub fn resume_system(&mut self, name: &str) -> bool {
        self.systems.resume(name)
    }

    /// Returns a sender for out-of-band control messages.
    #[must_use]
    pub fn control(&self) -> ControlSender {
        self.control.sender()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The shared entity manager.
    #[inline]
    #[must_use]
    pub fn entity_manager(&self) -> &EntityManager {
        &self.entities
    }

    /// The shared entity manager, mutably.
    #[inline]
    pub fn entity_manager_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    /// The system registry. Registration goes through
    /// [`add_system`](Self::add_system) and
    /// [`remove_system`](Self::remove_system).
    #[inline]
    #[must_use]
    pub fn system_manager(&self) -> &SystemManager {
        &self.systems
    }

    /// The configuration the engine was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks executed over the engine's lifetime.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Tick timing statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }
}
