use crate::cli::{AssessArgs, DemoArgs, PlanArgs, ProgramsArgs};
use crate::infra::{load_cli_config, service_for};
use biz_finder::error::AppError;
use biz_finder::workflows::eligibility::{
    Assessment, BonusFlags, BusinessPlanDraft, EligibilityService, ProfileSubmission,
    ProgramCatalog, Sector,
};
use chrono::Local;

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        profile,
        catalog,
        json,
    } = args;

    let config = load_cli_config()?;
    let service = service_for(catalog, &config)?;
    let assessment = service.assess(profile.into_submission())?;

    if json {
        print_json(&assessment);
    } else {
        render_assessment(&assessment);
    }
    Ok(())
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        profile,
        program,
        issued_on,
        catalog,
        json,
    } = args;

    let config = load_cli_config()?;
    let service = service_for(catalog, &config)?;
    let issued_on = issued_on.unwrap_or_else(|| Local::now().date_naive());
    let draft =
        service.draft_business_plan(profile.into_submission(), program.as_deref(), issued_on)?;

    if json {
        print_json(&draft);
    } else {
        render_draft(&draft);
    }
    Ok(())
}

pub(crate) fn run_programs(args: ProgramsArgs) -> Result<(), AppError> {
    let config = load_cli_config()?;
    let service = service_for(args.catalog, &config)?;

    if args.json {
        print_json(service.catalog().entries());
    } else {
        render_programs(service.catalog());
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        issued_on,
        skip_plan,
    } = args;
    load_cli_config()?;
    let issued_on = issued_on.unwrap_or_else(|| Local::now().date_naive());
    let service = EligibilityService::standard();

    println!("Policy fund eligibility demo");
    for (title, submission) in showcase_submissions() {
        println!("\n=== {title} ===");
        match service.assess(submission.clone()) {
            Ok(assessment) => render_assessment(&assessment),
            Err(err) => {
                println!("  Submission rejected: {err}");
                continue;
            }
        }

        if skip_plan {
            continue;
        }
        match service.draft_business_plan(submission, None, issued_on) {
            Ok(draft) => {
                println!();
                render_draft(&draft);
            }
            Err(err) => println!("\nBusiness plan unavailable: {err}"),
        }
    }

    Ok(())
}

fn showcase_submissions() -> Vec<(&'static str, ProfileSubmission)> {
    let typical = ProfileSubmission {
        sector: Sector::Manufacturing,
        years_established: 3,
        annual_revenue: 10.0,
        operating_profit: 1.0,
        policy_loan_balance: 2.0,
        debt_ratio: 250,
        employee_count: 5,
        employee_grew_yoy: false,
        ceo_credit_score: 850,
        bonus_flags: BonusFlags::default(),
    };
    let strong = ProfileSubmission {
        sector: Sector::ItSoftware,
        years_established: 5,
        annual_revenue: 20.0,
        operating_profit: 3.0,
        policy_loan_balance: 0.0,
        debt_ratio: 100,
        employee_count: 15,
        employee_grew_yoy: true,
        ceo_credit_score: 950,
        bonus_flags: BonusFlags {
            has_research_lab: true,
            has_patent: true,
            ..BonusFlags::default()
        },
    };
    let ineligible = ProfileSubmission {
        ceo_credit_score: 550,
        ..typical.clone()
    };

    vec![
        ("Strong IT/software company", strong),
        ("Average manufacturer", typical),
        ("Low CEO credit score", ineligible),
    ]
}

pub(crate) fn render_assessment(assessment: &Assessment) {
    let result = &assessment.result;
    let profile = &assessment.profile;

    println!(
        "Profile: {} | {} year(s) | revenue {:.1} | debt ratio {}% | credit {}",
        profile.sector,
        profile.years_established,
        profile.annual_revenue,
        profile.debt_ratio,
        profile.ceo_credit_score
    );

    if !result.is_eligible() {
        println!("Result: {}", result.eligibility.summary());
        println!("Score: {} | Remaining limit: 0.0", result.score);
        return;
    }

    println!(
        "Score: {} | Max limit: {:.1} | Remaining limit: {:.1} (100M KRW)",
        result.score, result.max_limit, result.remaining_limit
    );

    println!("\nScore components");
    for component in &result.components {
        println!("- {:+4} {}", component.points, component.notes);
    }

    if result.matched_programs.is_empty() {
        println!("\nMatched programs: none");
    } else {
        println!("\nMatched programs");
        for program in &result.matched_programs {
            if program.is_warning() {
                println!("- [!] {} ({})", program.name, program.agency);
            } else {
                println!(
                    "- {} ({}) up to {:.1} | rate {} | fit {}",
                    program.name, program.agency, program.amount_cap, program.rate, program.fit
                );
            }
        }
    }

    if let Some(insights) = &assessment.insights {
        println!(
            "\nGrade {} | {:+} vs industry average | approval likelihood {}% | remaining {} (10K KRW)",
            insights.grade.label(),
            insights.benchmark_delta,
            insights.approval_likelihood_pct,
            insights.remaining_limit_manwon
        );
        println!("Radar");
        for axis in &insights.radar {
            println!(
                "- {:<18} {:>5.1} (benchmark {:.0})",
                axis.label, axis.value, axis.benchmark
            );
        }
    }

    if let Some(narrative) = &assessment.narrative {
        println!("\n{narrative}");
    }
}

pub(crate) fn render_draft(draft: &BusinessPlanDraft) {
    print!("{}", draft.body());
}

pub(crate) fn render_programs(catalog: &ProgramCatalog) {
    println!("Policy fund programs");
    for entry in catalog.entries() {
        let sectors = if entry.sectors.is_empty() {
            "all sectors".to_string()
        } else {
            entry
                .sectors
                .iter()
                .map(|sector| sector.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "- {} [{}] {} | {} | ceiling {:.1} | rate {} | {} | {}",
            entry.key,
            entry.agency,
            entry.name,
            entry.category.label(),
            entry.ceiling,
            entry.rate,
            entry.rule.describe(),
            sectors
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to encode output: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn showcase_profiles_cover_each_outcome() {
        let service = EligibilityService::standard();
        let scores: Vec<(u8, bool)> = showcase_submissions()
            .into_iter()
            .map(|(_, submission)| {
                let assessment = service.assess(submission).expect("showcase within bounds");
                (assessment.result.score, assessment.result.is_eligible())
            })
            .collect();

        assert_eq!(scores, vec![(98, true), (60, true), (0, false)]);
    }

    #[test]
    fn showcase_drafts_only_for_eligible_profiles() {
        let service = EligibilityService::standard();
        let issued_on = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");

        let drafted: Vec<bool> = showcase_submissions()
            .into_iter()
            .map(|(_, submission)| {
                service
                    .draft_business_plan(submission, None, issued_on)
                    .is_ok()
            })
            .collect();

        assert_eq!(drafted, vec![true, true, false]);
    }
}
