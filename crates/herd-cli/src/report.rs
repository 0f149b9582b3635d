//! Text rendering of a sourcing run.

use std::io::{self, Write};

use herd_algo::RunOutcome;
use tabwriter::TabWriter;

/// Write the summary, plan, cost lines and plant load of `outcome` as
/// tab-aligned tables.
pub fn write_tables<W: Write>(out: W, outcome: &RunOutcome) -> io::Result<()> {
    let report = &outcome.report;
    let mut writer = TabWriter::new(out);

    write!(writer, "{}", report.summary())?;
    writeln!(
        writer,
        "Solver: {} ({:.3}s)",
        outcome.solver,
        outcome.solve_time.as_secs_f64()
    )?;
    if !report.has_plan() {
        return writer.flush();
    }

    writeln!(writer)?;
    writeln!(writer, "WEEK\tZONE\tPLANT\tINTEGRATED\tPURCHASED\tTOTAL\tINT TRIPS\tPUR TRIPS")?;
    for row in &report.plan {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.week,
            row.zone,
            row.plant,
            row.integrated_head,
            row.purchased_head,
            row.total_head,
            row.integrated_trips,
            row.purchased_trips
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "COST LINE\tAMOUNT")?;
    for (name, amount) in report.breakdown.line_items() {
        writeln!(writer, "{name}\t{amount:.2}")?;
    }

    writeln!(writer)?;
    writeln!(writer, "PLANT\tWEEK\tHEAD\tCAPACITY\tUTILIZATION\tOUT TRIPS")?;
    for pw in &report.plant_weeks {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{:.1}%\t{}",
            pw.plant,
            pw.week,
            pw.head,
            pw.capacity,
            pw.utilization * 100.0,
            pw.outbound_trips
        )?;
    }

    if !outcome.violations.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "VIOLATIONS")?;
        for v in &outcome.violations {
            writeln!(writer, "{v}")?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herd_algo::SourcingReport;
    use herd_solver_common::SolveStatus;
    use std::time::Duration;

    fn render(outcome: &RunOutcome) -> String {
        let mut buf = Vec::new();
        write_tables(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_infeasible_prints_summary_only() {
        let outcome = RunOutcome {
            report: SourcingReport::empty(SolveStatus::Infeasible, 22_000.0),
            violations: Vec::new(),
            solve_time: Duration::from_millis(250),
            solver: "highs".to_string(),
        };
        let text = render(&outcome);
        assert!(text.contains("Status: infeasible"));
        assert!(text.contains("No feasible plan."));
        assert!(text.contains("Solver: highs (0.250s)"));
        assert!(!text.contains("COST LINE"));
    }

    #[test]
    fn test_empty_optimal_plan_has_cost_table() {
        let mut report = SourcingReport::empty(SolveStatus::Optimal, 22_000.0);
        report.proven_optimal = true;
        let outcome = RunOutcome {
            report,
            violations: Vec::new(),
            solve_time: Duration::ZERO,
            solver: "none".to_string(),
        };
        let text = render(&outcome);
        assert!(text.contains("COST LINE"));
        assert!(text.contains("net value"));
        assert!(!text.contains("not proven optimal"));
    }
}
