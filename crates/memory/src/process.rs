use crate::config::{validate_page_size, validate_requirements};
use crate::typedef::ProcessId;
use crate::{Error, Result};
use pagesim_error::{errconfig, errinput};

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Waiting,
    Running,
    /// Declared for completeness; no operation moves a process here.
    Completed,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProcessState::Waiting => "WAITING",
            ProcessState::Running => "RUNNING",
            ProcessState::Completed => "COMPLETED",
        };
        f.pad(name)
    }
}

/// A process competing for frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    process_id: ProcessId,
    memory_requirement_kb: u32,
    allocated: bool,
    state: ProcessState,
}

impl Process {
    fn new(process_id: ProcessId, memory_requirement_kb: u32) -> Self {
        Self {
            process_id,
            memory_requirement_kb,
            allocated: false,
            state: ProcessState::Waiting,
        }
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    pub fn memory_requirement_kb(&self) -> u32 {
        self.memory_requirement_kb
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Records a fully satisfied allocation attempt.
    pub(crate) fn mark_running(&mut self) {
        self.allocated = true;
        self.state = ProcessState::Running;
    }

    /// Records an attempt that left the process short of pages.
    pub(crate) fn mark_waiting(&mut self) {
        self.allocated = false;
        self.state = ProcessState::Waiting;
    }
}

/// Number of pages needed to hold `memory_requirement_kb`, rounded up.
pub fn required_pages(memory_requirement_kb: u32, page_size_kb: u32) -> Result<usize> {
    validate_page_size(page_size_kb)?;
    Ok(usize::try_from(memory_requirement_kb.div_ceil(page_size_kb))?)
}

/// The processes of a simulation, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    /// Registers one process per requirement, with ids `1..=n`.
    pub fn from_requirements(requirements: &[u32]) -> Result<Self> {
        validate_requirements(requirements)?;
        let processes = requirements
            .iter()
            .zip(1..)
            .map(|(&kb, id)| Process::new(id, kb))
            .collect();
        Ok(Self { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Process> {
        self.processes.iter_mut()
    }

    pub fn get(&self, process_id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.process_id == process_id)
    }

    fn get_mut(&mut self, process_id: ProcessId) -> Result<&mut Process> {
        match self.processes.iter_mut().find(|p| p.process_id == process_id) {
            Some(process) => Ok(process),
            None => errinput!("no process with id {}", process_id),
        }
    }

    /// Adds `extra_kb` to the requirement of `process_id`.
    pub(crate) fn grow_requirement(&mut self, process_id: ProcessId, extra_kb: u32) -> Result<()> {
        let process = self.get_mut(process_id)?;
        process.memory_requirement_kb = process
            .memory_requirement_kb
            .checked_add(extra_kb)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    /// Replaces every requirement, in registration order.
    pub(crate) fn update_requirements(&mut self, requirements: &[u32]) -> Result<()> {
        validate_requirements(requirements)?;
        if requirements.len() != self.processes.len() {
            return errconfig!(
                "expected {} requirements, got {}",
                self.processes.len(),
                requirements.len()
            );
        }
        for (process, &kb) in self.processes.iter_mut().zip(requirements) {
            process.memory_requirement_kb = kb;
        }
        Ok(())
    }
}
