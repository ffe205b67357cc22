//! Interactive screens, one per wizard step.

use colored::Colorize;
use comfy_table::{Cell, Table};
use dialoguer::{Confirm, Input, MultiSelect, Select};

use msb_core::delivery::{BackupExporter, NotificationSink};
use msb_core::fiscal::{FILING_GUIDANCE, Quarter, QuarterMonth, QuarterStatus};
use msb_core::reports::{Metric, MonthlyActivity, QuarterMonths, ReportService, ServiceType};
use msb_core::wizard::{AdvanceOutcome, FieldUpdate, Step, WizardController};

/// What to do after a screen.
enum Nav {
    Next,
    Back,
    Stay,
    Quit,
}

/// Runs the wizard until the operator quits.
pub async fn run(
    wizard: &mut WizardController,
    sink: &dyn NotificationSink,
    exporter: &dyn BackupExporter,
) -> anyhow::Result<()> {
    loop {
        let step = wizard.current_step();
        println!();
        println!(
            "{}  {}",
            wizard.progress_label().dimmed(),
            step.title_for(wizard.draft().quarter).bold()
        );

        let nav = match step {
            Step::Welcome => welcome()?,
            Step::CompanyInfo => company_info(wizard)?,
            Step::ContactPerson => contact_person(wizard)?,
            Step::ReportingPeriod => reporting_period(wizard)?,
            Step::ServiceSelection => service_selection(wizard)?,
            Step::CheckCashing(month) => check_cashing(wizard, month)?,
            Step::DeferredPresentment(month) => deferred_presentment(wizard, month)?,
            Step::Review => review(wizard, sink, exporter).await?,
            Step::Result => result(wizard)?,
        };

        match nav {
            Nav::Next => {
                if wizard.advance()? == AdvanceOutcome::Blocked {
                    println!("{}", blocked_message(wizard, step).red());
                }
            }
            Nav::Back => {
                wizard.retreat()?;
            }
            Nav::Stay => {}
            Nav::Quit => return Ok(()),
        }
    }
}

fn navigate() -> anyhow::Result<Nav> {
    let choice = Select::new()
        .items(&["Continue", "Back", "Quit"])
        .default(0)
        .interact()?;
    Ok(match choice {
        0 => Nav::Next,
        1 => Nav::Back,
        _ => Nav::Quit,
    })
}

fn text(prompt: &str, current: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}

fn welcome() -> anyhow::Result<Nav> {
    println!("MSB Quarterly Report");
    println!("File your money services business activity with ComplyCheck.");
    println!();
    println!("{}", "Filing Information".bold());
    for line in FILING_GUIDANCE {
        println!("  \u{2022} {line}");
    }
    println!();

    let start = Select::new()
        .items(&["Start Report", "Quit"])
        .default(0)
        .interact()?;
    Ok(if start == 0 { Nav::Next } else { Nav::Quit })
}

fn company_info(wizard: &mut WizardController) -> anyhow::Result<Nav> {
    let legal_name = text("Legal Company Name", &wizard.draft().legal_name)?;
    wizard.set_field(FieldUpdate::LegalName(legal_name))?;
    let dba = text("DBA (if different)", &wizard.draft().dba)?;
    wizard.set_field(FieldUpdate::Dba(dba))?;
    navigate()
}

fn contact_person(wizard: &mut WizardController) -> anyhow::Result<Nav> {
    let name = text("Contact Person", &wizard.draft().contact_person)?;
    wizard.set_field(FieldUpdate::ContactPerson(name))?;
    navigate()
}

fn reporting_period(wizard: &mut WizardController) -> anyhow::Result<Nav> {
    let quarters: Vec<String> = Quarter::ALL
        .iter()
        .map(|q| format!("{q} ({})", q.period_label()))
        .collect();
    let current_quarter = wizard
        .draft()
        .quarter
        .and_then(|q| Quarter::ALL.iter().position(|&other| other == q))
        .unwrap_or(0);
    let quarter = Select::new()
        .with_prompt("Quarter")
        .items(&quarters)
        .default(current_quarter)
        .interact()?;
    wizard.set_field(FieldUpdate::Quarter(Quarter::ALL[quarter]))?;

    let years = wizard.available_years();
    let current_year = wizard
        .draft()
        .year
        .and_then(|y| years.iter().position(|&other| other == y))
        .unwrap_or(0);
    let year = Select::new()
        .with_prompt("Year")
        .items(&years)
        .default(current_year)
        .interact()?;
    wizard.set_field(FieldUpdate::Year(years[year]))?;

    if let Some(status) = wizard.quarter_status() {
        println!("{}", status_line(status));
    }

    let amendment = Confirm::new()
        .with_prompt("Is this an amendment to a previously filed report?")
        .default(wizard.draft().is_amendment)
        .interact()?;
    wizard.set_field(FieldUpdate::Amendment(amendment))?;

    navigate()
}

fn status_line(status: QuarterStatus) -> String {
    match status {
        QuarterStatus::Future => status.advisory().red().to_string(),
        QuarterStatus::Late => status.advisory().yellow().to_string(),
        QuarterStatus::Current => status.advisory().green().to_string(),
    }
}

fn service_selection(wizard: &mut WizardController) -> anyhow::Result<Nav> {
    let names: Vec<&str> = ServiceType::ALL.iter().map(|s| s.display_name()).collect();
    let selected: Vec<bool> = ServiceType::ALL
        .iter()
        .map(|&s| wizard.draft().has_service(s))
        .collect();
    let chosen = MultiSelect::new()
        .with_prompt("Which services does your business offer? (space to toggle)")
        .items(&names)
        .defaults(&selected)
        .interact()?;

    for (i, &service) in ServiceType::ALL.iter().enumerate() {
        wizard.set_field(FieldUpdate::Service {
            service,
            selected: chosen.contains(&i),
        })?;
    }
    navigate()
}

fn collect_month<A: MonthlyActivity>(current: &A) -> anyhow::Result<Vec<(A::Metric, String)>> {
    A::METRICS
        .iter()
        .map(|&metric| -> anyhow::Result<_> {
            Ok((metric, text(metric.prompt(), current.raw(metric))?))
        })
        .collect()
}

fn check_cashing(wizard: &mut WizardController, month: QuarterMonth) -> anyhow::Result<Nav> {
    let current = wizard
        .draft()
        .check_cashing()
        .map(|months| months.get(month).clone())
        .unwrap_or_default();
    for (metric, value) in collect_month(&current)? {
        wizard.set_field(FieldUpdate::CheckCashing {
            month,
            metric,
            value,
        })?;
    }
    navigate()
}

fn deferred_presentment(wizard: &mut WizardController, month: QuarterMonth) -> anyhow::Result<Nav> {
    let current = wizard
        .draft()
        .deferred_presentment()
        .map(|months| months.get(month).clone())
        .unwrap_or_default();
    for (metric, value) in collect_month(&current)? {
        wizard.set_field(FieldUpdate::DeferredPresentment {
            month,
            metric,
            value,
        })?;
    }
    navigate()
}

fn totals_table<A: MonthlyActivity>(quarter: Quarter, months: &QuarterMonths<A>) -> Table {
    let totals = ReportService::quarter_totals(months);
    let mut table = Table::new();

    let mut header = vec![String::new()];
    header.extend(QuarterMonth::ALL.iter().map(|&m| quarter.month_name(m).to_string()));
    header.push("Quarter Total".to_string());
    table.set_header(header);

    for &metric in A::METRICS {
        let mut row = vec![Cell::new(metric.label())];
        row.extend(
            months
                .iter()
                .map(|m| Cell::new(ReportService::metric_value(metric.kind(), m.raw(metric)))),
        );
        if let Some(total) = totals.get(&metric) {
            row.push(Cell::new(total));
        }
        table.add_row(row);
    }
    table
}

fn print_review(wizard: &WizardController) {
    let draft = wizard.draft();
    println!("Company:        {}", draft.legal_name);
    if !draft.dba.trim().is_empty() {
        println!("DBA:            {}", draft.dba);
    }
    println!("Contact Person: {}", draft.contact_person);

    let Some(quarter) = draft.quarter else {
        return;
    };
    let year = draft.year.map(|y| y.to_string()).unwrap_or_default();
    let amendment = if draft.is_amendment {
        " (AMENDMENT)".yellow().to_string()
    } else {
        String::new()
    };
    println!("Quarter:        {quarter} {year}{amendment}");
    println!("Period:         {}", quarter.period_label());

    if let Some(months) = draft.check_cashing() {
        println!("\n{}", ServiceType::CheckCashing.display_name().bold());
        println!("{}", totals_table(quarter, months));
    }
    if let Some(months) = draft.deferred_presentment() {
        println!("\n{}", ServiceType::DeferredPresentment.display_name().bold());
        println!("{}", totals_table(quarter, months));
    }
}

async fn review(
    wizard: &mut WizardController,
    sink: &dyn NotificationSink,
    exporter: &dyn BackupExporter,
) -> anyhow::Result<Nav> {
    print_review(wizard);
    println!();

    let choice = Select::new()
        .with_prompt("Ready to submit?")
        .items(&["Submit Report", "Make Changes", "Back", "Quit"])
        .default(0)
        .interact()?;

    match choice {
        0 => {
            println!("{}", "Submitting...".dimmed());
            wizard.submit(sink, exporter).await?;
            Ok(Nav::Stay)
        }
        1 => {
            wizard.jump_to(Step::CompanyInfo)?;
            Ok(Nav::Stay)
        }
        2 => Ok(Nav::Back),
        _ => Ok(Nav::Quit),
    }
}

fn result(wizard: &mut WizardController) -> anyhow::Result<Nav> {
    let Some(receipt) = wizard.last_receipt().cloned() else {
        return Ok(Nav::Quit);
    };

    if receipt.is_success() {
        println!("{}", "Report Submitted Successfully!".green().bold());
        println!("Your MSB quarterly report has been sent to ComplyCheck for processing.");
        println!("Backup saved as {}", receipt.backup_filename);

        let choice = Select::new()
            .items(&["Start New Report", "Exit"])
            .default(1)
            .interact()?;
        if choice == 0 {
            wizard.reset();
            return Ok(Nav::Stay);
        }
        return Ok(Nav::Quit);
    }

    println!("{}", "Submission Failed".red().bold());
    if let Some(instructions) = receipt.fallback_instructions() {
        println!("{instructions}");
    }

    let choice = Select::new()
        .items(&["Try Again", "Make Changes", "Exit"])
        .default(0)
        .interact()?;
    match choice {
        0 => wizard.retry()?,
        1 => wizard.jump_to(Step::CompanyInfo)?,
        _ => return Ok(Nav::Quit),
    }
    Ok(Nav::Stay)
}

fn blocked_message(wizard: &WizardController, step: Step) -> String {
    match step {
        Step::CompanyInfo => "Legal company name is required.".to_string(),
        Step::ContactPerson => "Contact person is required.".to_string(),
        Step::ReportingPeriod => match wizard.quarter_status() {
            Some(status @ QuarterStatus::Future) => status.advisory().to_string(),
            _ => "Select a quarter and year within the filing window.".to_string(),
        },
        Step::ServiceSelection => "Select at least one service.".to_string(),
        _ => "Complete this step to continue.".to_string(),
    }
}
