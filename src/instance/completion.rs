//! Completion-time matrix.

/// Cumulative completion times of a (possibly partial) job sequence.
///
/// Row `i` describes the job at sequence position `i`. Column 0 holds the
/// job id; columns `1..=M` hold the completion time of that job on each
/// machine. The matrix is a pure function of the instance and the job
/// order that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionTimes {
    stride: usize,
    cells: Vec<i64>,
}

impl CompletionTimes {
    /// Wraps raw row-major cells with `machines + 1` columns per row.
    pub(crate) fn from_cells(machines: usize, cells: Vec<i64>) -> Self {
        let stride = machines + 1;
        debug_assert_eq!(cells.len() % stride, 0);
        Self { stride, cells }
    }

    pub(crate) fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Number of sequence positions (rows).
    pub fn len(&self) -> usize {
        self.cells.len() / self.stride
    }

    /// Returns `true` if no job has been scheduled.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of machines (columns excluding the job-id column).
    pub fn number_of_machines(&self) -> usize {
        self.stride - 1
    }

    /// The job id at sequence `position`.
    pub fn job_at(&self, position: usize) -> usize {
        self.cells[position * self.stride] as usize
    }

    /// Completion time of the job at `position` on `machine` (1-based).
    pub fn completion(&self, position: usize, machine: usize) -> i64 {
        assert!(
            (1..self.stride).contains(&machine),
            "machine {machine} out of range 1..={}",
            self.stride - 1
        );
        self.cells[position * self.stride + machine]
    }

    /// Completion time of the job at `position` on the last machine.
    pub fn last_completion(&self, position: usize) -> i64 {
        self.cells[position * self.stride + self.stride - 1]
    }

    /// The full row at `position`: job id followed by per-machine times.
    pub fn row(&self, position: usize) -> &[i64] {
        let start = position * self.stride;
        &self.cells[start..start + self.stride]
    }

    /// The job ids in sequence order.
    pub fn jobs(&self) -> Vec<usize> {
        (0..self.len()).map(|pos| self.job_at(pos)).collect()
    }
}
