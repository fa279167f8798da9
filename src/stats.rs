//! System statistics snapshot and the sources that produce it.
//!
//! Widgets never gather statistics themselves: once per frame the main loop
//! asks a [`StatsSource`] to refresh, and every widget reads the same
//! [`Stats`] snapshot. That keeps drawing free of I/O and lets tests hand the
//! bar any snapshot they like.
//!
//! # Simulated Source
//!
//! [`SimulatedStats`] produces deterministic, smoothly varying values from
//! phase-shifted sine waves. Each figure gets its own frequency so the bar
//! never looks frozen.

use crate::config::{SIM_CPU_CORES, SIM_MEMORY_TOTAL_MB, SIM_TIME_STEP};

// =============================================================================
// Snapshot Types
// =============================================================================

/// Battery state. Absent when the machine has no battery.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Battery {
    pub plugged_in: bool,
    /// Charge level, 0..=100.
    pub charge_pct: f32,
    /// Estimated minutes left, when known.
    pub minutes_remaining: Option<u32>,
}

/// Mixer output levels. Absent when there is no mixer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Volume {
    pub left_pct: f32,
    pub right_pct: f32,
}

/// Physical memory split, in megabytes.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Memory {
    pub free_mb: f32,
    /// Memory in use, `active_mb` included.
    pub total_mb: f32,
    pub active_mb: f32,
}

impl Memory {
    /// Share of physical memory per series: free, in use but not active, active.
    pub fn percentages(&self) -> [f32; 3] {
        let physical = self.free_mb + self.total_mb;
        if physical <= 0.0 {
            return [0.0; 3];
        }
        let pct = |mb: f32| (mb / physical * 100.0).clamp(0.0, 100.0);
        [
            pct(self.free_mb),
            pct(self.total_mb - self.active_mb),
            pct(self.active_mb),
        ]
    }
}

/// Time split of one core over the last interval, percentages summing to 100.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Cpu {
    pub idle: f32,
    pub interrupt: f32,
    pub sys: f32,
    pub nice: f32,
    pub user: f32,
}

impl Cpu {
    /// Percentages in histogram series order: idle, interrupt, sys, nice, user.
    pub const fn series(&self) -> [f32; 5] { [self.idle, self.interrupt, self.sys, self.nice, self.user] }
}

/// Network throughput over the last interval, in bytes per second.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Network {
    pub inbound: f64,
    pub outbound: f64,
}

/// Everything the widgets read for one frame.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Stats {
    pub battery: Option<Battery>,
    pub volume: Option<Volume>,
    pub nprocs: u32,
    pub memory: Memory,
    pub cpus: Vec<Cpu>,
    pub network: Network,
}

// =============================================================================
// Sources
// =============================================================================

/// Produces a fresh [`Stats`] snapshot once per frame.
pub trait StatsSource {
    /// Gather new values and return the updated snapshot.
    fn refresh(&mut self) -> &Stats;
}

/// Deterministic fake statistics driven by sine waves.
pub struct SimulatedStats {
    t: f32,
    stats: Stats,
    has_battery: bool,
    has_mixer: bool,
}

impl Default for SimulatedStats {
    fn default() -> Self { Self::new(true, true) }
}

impl SimulatedStats {
    pub fn new(
        has_battery: bool,
        has_mixer: bool,
    ) -> Self {
        Self {
            t: 0.0,
            stats: Stats {
                cpus: vec![Cpu::default(); SIM_CPU_CORES],
                ..Stats::default()
            },
            has_battery,
            has_mixer,
        }
    }

    /// Last produced snapshot.
    #[cfg(test)]
    pub fn stats(&self) -> &Stats { &self.stats }
}

impl StatsSource for SimulatedStats {
    fn refresh(&mut self) -> &Stats {
        let t = self.t;
        let s = &mut self.stats;

        s.battery = self.has_battery.then(|| {
            let charge_pct = fake_signal(t, 5.0, 100.0, 0.01);
            let plugged_in = fake_signal(t, 0.0, 1.0, 0.005) > 0.5;
            Battery {
                plugged_in,
                charge_pct,
                minutes_remaining: (!plugged_in).then(|| (charge_pct * 3.0) as u32),
            }
        });

        s.volume = self.has_mixer.then(|| {
            let level = fake_signal(t, 0.0, 100.0, 0.02).round();
            // Channels drift apart for part of the cycle.
            let balance = if fake_signal(t, 0.0, 1.0, 0.03) > 0.8 { 10.0 } else { 0.0 };
            Volume {
                left_pct: level,
                right_pct: (level - balance).max(0.0),
            }
        });

        s.nprocs = fake_signal(t, 80.0, 160.0, 0.07) as u32;

        let active_mb = fake_signal(t, 1_024.0, 6_144.0, 0.05);
        let total_mb = active_mb + fake_signal(t, 512.0, 4_096.0, 0.03);
        s.memory = Memory {
            free_mb: (SIM_MEMORY_TOTAL_MB - total_mb).max(0.0),
            total_mb,
            active_mb,
        };

        for (core, cpu) in s.cpus.iter_mut().enumerate() {
            let phase = t + core as f32 * 7.0;
            let user = fake_signal(phase, 0.0, 60.0, 0.11);
            let sys = fake_signal(phase, 0.0, 20.0, 0.17);
            let nice = fake_signal(phase, 0.0, 5.0, 0.05);
            let interrupt = fake_signal(phase, 0.0, 3.0, 0.23);
            *cpu = Cpu {
                idle: (100.0 - user - sys - nice - interrupt).max(0.0),
                interrupt,
                sys,
                nice,
                user,
            };
        }

        s.network = Network {
            inbound: f64::from(burst_signal(t, 0.0, 2_500_000.0, 0.13)),
            outbound: f64::from(fake_signal(t, 0.0, 400_000.0, 0.09)),
        };

        self.t += SIM_TIME_STEP;
        &self.stats
    }
}

// =============================================================================
// Signal Generators
// =============================================================================

/// Smooth sine between `min` and `max`.
fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Like [`fake_signal`], but holds at `max` for part of each cycle.
fn burst_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let cycle = (t * freq) % std::f32::consts::TAU;
    let normalized = if cycle > 1.2 && cycle < 1.9 { 1.0 } else { cycle.sin().mul_add(0.5, 0.5) };
    min + normalized * (max - min)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_signal_stays_in_range() {
        for i in 0..500 {
            let v = fake_signal(i as f32 * 0.37, -10.0, 70.0, 0.05);
            assert!((-10.0..=70.0).contains(&v), "value {v} out of range");
        }
    }

    #[test]
    fn test_burst_signal_holds_peak() {
        // cycle = t * freq = 1.5 falls inside the hold window.
        assert_eq!(burst_signal(15.0, 0.0, 100.0, 0.1), 100.0);
    }

    #[test]
    fn test_simulated_snapshot_is_consistent() {
        let mut source = SimulatedStats::default();
        for _ in 0..200 {
            let stats = source.refresh();

            assert_eq!(stats.cpus.len(), SIM_CPU_CORES);
            for cpu in &stats.cpus {
                let sum: f32 = cpu.series().iter().sum();
                assert!((sum - 100.0).abs() < 0.01, "cpu split should sum to 100, got {sum}");
            }

            let mem: f32 = stats.memory.percentages().iter().sum();
            assert!((mem - 100.0).abs() < 0.01, "memory split should sum to 100, got {mem}");

            let battery = stats.battery.unwrap();
            assert!((0.0..=100.0).contains(&battery.charge_pct));
            assert_eq!(battery.plugged_in, battery.minutes_remaining.is_none());
            assert!(stats.network.inbound >= 0.0 && stats.network.outbound >= 0.0);
        }
    }

    #[test]
    fn test_optional_devices() {
        let mut source = SimulatedStats::new(false, false);
        let stats = source.refresh();
        assert!(stats.battery.is_none());
        assert!(stats.volume.is_none());
    }

    #[test]
    fn test_refresh_advances() {
        let mut source = SimulatedStats::default();
        let first = source.refresh().clone();
        let second = source.refresh().clone();
        assert_ne!(first, second);
        assert_eq!(source.stats(), &second);
    }

    #[test]
    fn test_memory_percentages_empty() {
        assert_eq!(Memory::default().percentages(), [0.0; 3]);
    }
}
