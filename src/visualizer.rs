use crate::domain::Domain;
use crate::goal::Goal;
use crate::plan::Plan;
use crate::state::State;
use crate::Result;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders a plan's state trajectory as a Graphviz DOT graph
pub struct PlanVisualizer;

impl PlanVisualizer {
    pub fn new() -> Self {
        Self
    }

    /// Generate DOT text for `plan` replayed from `initial`.
    ///
    /// Fails if the plan does not apply to `initial`.
    pub fn render(&self, plan: &Plan, initial: &State, goal: &Goal, domain: &Domain) -> Result<String> {
        let trajectory = plan.simulate(initial, domain)?;
        let mut dot = String::new();

        // writing into a String cannot fail
        let _ = writeln!(dot, "digraph HarvestPlan {{");
        let _ = writeln!(dot, "    rankdir=TB;");
        let _ = writeln!(dot, "    node [shape=box, style=filled, fillcolor=lightblue];");
        let _ = writeln!(dot, "    edge [fontsize=10];");
        let _ = writeln!(
            dot,
            "    goal [label=\"Goal\\n{}\", fillcolor=lightpink];",
            escape(&goal.to_string())
        );

        let last = trajectory.len() - 1;
        for (i, state) in trajectory.iter().enumerate() {
            let fill = if i == 0 {
                ", fillcolor=lightgreen"
            } else if i == last && goal.is_satisfied(state) {
                ", fillcolor=lightcoral"
            } else {
                ""
            };
            let _ = writeln!(
                dot,
                "    state_{} [label=\"{}\"{}];",
                i,
                Self::state_label(state),
                fill
            );
        }

        for (i, action) in plan.iter().enumerate() {
            let _ = writeln!(
                dot,
                "    state_{} -> state_{} [label=\"{} (cost {})\"];",
                i,
                i + 1,
                escape(&action.to_string()),
                action.cost(domain)
            );
        }

        if goal.is_satisfied(&trajectory[last]) {
            let _ = writeln!(dot, "    state_{} -> goal [style=dashed, label=\"achieves\"];", last);
        }

        let _ = writeln!(dot, "}}");
        Ok(dot)
    }

    /// Write the DOT rendering of `plan` to `path`.
    pub fn write_to(
        &self,
        path: impl AsRef<Path>,
        plan: &Plan,
        initial: &State,
        goal: &Goal,
        domain: &Domain,
    ) -> Result<()> {
        let dot = self.render(plan, initial, goal, domain)?;
        let mut file = File::create(path)?;
        file.write_all(dot.as_bytes())?;
        Ok(())
    }

    fn state_label(state: &State) -> String {
        let mut lines = vec![format!("worker: {}", state.worker())];
        match state.cargo() {
            Some(cargo) => lines.push(format!("cargo: {}", cargo)),
            None => lines.push("cargo: none".to_string()),
        }
        lines.push(format!("banked: {}", state.banked()));
        for node in state.nodes() {
            lines.push(format!("{} {}: {}", node.id, node.kind, node.remaining));
        }
        lines
            .iter()
            .map(|line| escape(line))
            .collect::<Vec<_>>()
            .join("\\n")
    }
}

impl Default for PlanVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}
