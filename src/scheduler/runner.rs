use super::{display::DisplayTerminal, Algorithm, Outcome, ProcessRecord, ScheduleError};
use std::io;

pub enum RunnerEvent {
    Quit,
    Fcfs,
    Priority,
    RoundRobin,
    QuantumUp,
    QuantumDown,
    ToggleIdleGaps,
    None,
}

/// What the terminal shows: the workload, the current settings and the
/// result of the last run.
pub struct Simulation {
    workload: Vec<ProcessRecord>,
    quantum: u64,
    idle_gaps: bool,
    algorithm: Option<Algorithm>,
    outcome: Option<Result<Outcome, ScheduleError>>,
}

impl Simulation {
    pub fn new(workload: Vec<ProcessRecord>, quantum: u64, idle_gaps: bool) -> Self {
        Self {
            workload,
            quantum,
            idle_gaps,
            algorithm: None,
            outcome: None,
        }
    }

    pub fn workload(&self) -> &[ProcessRecord] {
        &self.workload
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    pub fn idle_gaps(&self) -> bool {
        self.idle_gaps
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn outcome(&self) -> Option<&Result<Outcome, ScheduleError>> {
        self.outcome.as_ref()
    }

    /// The records to show: the last successful run, or the untouched workload.
    pub fn processes(&self) -> &[ProcessRecord] {
        match &self.outcome {
            Some(Ok(outcome)) => outcome.processes(),
            _ => &self.workload,
        }
    }

    fn simulate(&mut self, algorithm: Algorithm) {
        let outcome = algorithm.run(&self.workload);
        if let Err(err) = &outcome {
            log::warn!("{} failed: {}", algorithm.name(), err);
        }
        self.algorithm = Some(algorithm);
        self.outcome = Some(outcome);
    }

    // Re-runs the last algorithm so it picks up changed settings
    fn refresh(&mut self) {
        match self.algorithm {
            Some(Algorithm::RoundRobin { .. }) => self.simulate(Algorithm::RoundRobin {
                quantum: self.quantum,
            }),
            Some(Algorithm::Fcfs { .. }) => self.simulate(Algorithm::Fcfs {
                idle_gaps: self.idle_gaps,
            }),
            _ => {}
        }
    }

    // Returns false if the program should quit
    pub fn handle(&mut self, event: RunnerEvent) -> bool {
        match event {
            RunnerEvent::Quit => return false,
            RunnerEvent::Fcfs => self.simulate(Algorithm::Fcfs {
                idle_gaps: self.idle_gaps,
            }),
            RunnerEvent::Priority => self.simulate(Algorithm::Priority),
            RunnerEvent::RoundRobin => self.simulate(Algorithm::RoundRobin {
                quantum: self.quantum,
            }),
            RunnerEvent::QuantumUp => {
                self.quantum = self.quantum.saturating_add(1);
                self.refresh();
            }
            RunnerEvent::QuantumDown => {
                self.quantum = self.quantum.saturating_sub(1);
                self.refresh();
            }
            RunnerEvent::ToggleIdleGaps => {
                self.idle_gaps = !self.idle_gaps;
                self.refresh();
            }
            RunnerEvent::None => {}
        }
        true
    }
}

pub struct SimulationRunner {
    terminal: DisplayTerminal,
    simulation: Simulation,
}

impl SimulationRunner {
    pub fn new(simulation: Simulation) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            simulation,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal.draw(&self.simulation)?;
        let event = self.terminal.get_input();
        Ok(self.simulation.handle(event))
    }
}
