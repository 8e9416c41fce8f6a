// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gate applications (`qsynth::operations::Operation`) on a fixed register.

use crate::core::{QsynthResult, QubitId};
use crate::operations::Operation;
use std::fmt;

/// An ordered sequence of operations applied to a register of fixed width.
///
/// Analogy: a `qiskit.QuantumCircuit` restricted to unitary gates. The
/// register width never changes after construction; every operation is
/// validated against it when appended.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Circuit {
    num_qubits: usize,

    /// The order is significant: operation `k` acts after operation `k - 1`.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    /// Appends an operation after validating its qubits against the register.
    ///
    /// # Errors
    /// Returns the validation error from [`Operation::validate`]; the circuit is left unchanged.
    pub fn add_operation(&mut self, op: Operation) -> QsynthResult<()> {
        op.validate(self.num_qubits)?;
        self.operations.push(op);
        Ok(())
    }

    /// Appends several operations, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> QsynthResult<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of gates applied so far.
    pub fn size(&self) -> usize {
        self.operations.len()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Drops every operation, keeping the register.
    pub fn clear(&mut self) {
        self.operations.clear();
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
/// Validation is deferred to [`CircuitBuilder::build`].
pub struct CircuitBuilder {
    num_qubits: usize,
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: Vec::new(),
        }
    }

    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    /// Validates every operation and returns the circuit.
    pub fn build(self) -> QsynthResult<Circuit> {
        let mut circuit = Circuit::new(self.num_qubits);
        circuit.add_operations(self.operations)?;
        Ok(circuit)
    }
}

/// Renders a wire diagram. The output is a pure function of the register
/// width and the operation sequence, so it doubles as the canonical text
/// fed to [`crate::fingerprint::CircuitFingerprint`].
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = &self.operations;
        let num_ops = ops.len();
        let num_qubits = self.num_qubits;

        writeln!(f, "qsynth::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        if num_qubits == 0 {
            return Ok(());
        }

        let labels: Vec<String> = (0..num_qubits).map(|q| format!("{}: ", QubitId(q))).collect();
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
        let label_padding = " ".repeat(label_width);

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the wire segment, v_connect[row][time] the
        // connector drawn below that row.
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate { gate, target } => {
                    if let Some(row) = op_grid.get_mut(target.0) {
                        row[t] = format_gate(gate.symbol());
                    }
                }
                Operation::ControlledX { control, target } => {
                    let (r_ctrl, r_tgt) = (control.0, target.0);
                    if r_ctrl < num_qubits && r_tgt < num_qubits {
                        op_grid[r_ctrl][t] = format_gate("@");
                        op_grid[r_tgt][t] = format_gate("X");

                        let r_min = r_ctrl.min(r_tgt);
                        let r_max = r_ctrl.max(r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
            }
        }

        for r in 0..num_qubits {
            write!(f, "{:<width$}", labels[r], width = label_width)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
