use crate::infra::{InMemoryRecommendationRepository, OfflineModelClient};
use clap::Args;
use scholar_ai::error::AppError;
use scholar_ai::workflows::matching::{
    ApplicantProfile, ApplicationId, MatchingService, ScholarshipCriteria, ScholarshipId,
    StudentId, StudentProfile,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Limit the number of recommendations printed
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Skip the sponsor ranking portion of the demo
    #[arg(long)]
    pub(crate) skip_ranking: bool,
}

/// Walks the matching and ranking flows against seeded data using the
/// offline client, so the output shows exactly what students and sponsors
/// see during a model outage.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { top, skip_ranking } = args;

    println!("Scholarship matching demo (offline rule-based path)");

    let repository = Arc::new(InMemoryRecommendationRepository::default());
    let service = Arc::new(MatchingService::new(
        Arc::new(OfflineModelClient),
        repository,
    ));

    let student = demo_student();
    let scholarships = demo_scholarships();
    let student_id = StudentId("demo-student".to_string());

    println!(
        "\nStudent: {} | {} | GPA {:.2} | income {}",
        student_id.0, student.course, student.gpa, student.income_range
    );

    let results = service
        .match_student(&student, &scholarships, Some(&student_id))
        .await;

    println!("Top recommendations:");
    for result in results.iter().take(top) {
        println!(
            "- [{}] {} -> {:.0}/100 ({}) {}",
            if result.eligible { "eligible" } else { "not eligible" },
            result.scholarship_name,
            result.score,
            result.recommendation.label(),
            result.explanation
        );
    }
    if let Some(first) = results.first() {
        println!("  (source: {})", first.source.label());
    }

    if skip_ranking {
        return Ok(());
    }

    println!("\nSponsor view: ranking applicants for '{}'", scholarships[0].name);
    let rankings = service
        .rank_applicants(&demo_applications(), &scholarships[0])
        .await;

    for result in &rankings {
        println!(
            "  #{} {} -> {:.0}/100 | {} | {}",
            result.rank,
            result.student_name,
            result.rank_score,
            if result.eligible { "eligible" } else { "below minimum" },
            result.recommendation
        );
        for strength in &result.strengths {
            println!("      + {}", strength);
        }
        for weakness in &result.weaknesses {
            println!("      - {}", weakness);
        }
    }

    Ok(())
}

fn demo_student() -> StudentProfile {
    StudentProfile {
        course: "Computer Science".to_string(),
        year_level: "3rd Year".to_string(),
        gpa: 3.6,
        income_range: "10,000 - 20,000".to_string(),
        skills: "Programming, data analysis".to_string(),
        extracurriculars: "Coding club lead".to_string(),
        preferred_type: "Academic".to_string(),
        essay: "I maintain our barangay's document tracker.".to_string(),
    }
}

fn demo_scholarships() -> Vec<ScholarshipCriteria> {
    vec![
        ScholarshipCriteria {
            scholarship_id: ScholarshipId("demo-academic".to_string()),
            name: "Academic Excellence Grant".to_string(),
            organization: "Lakan Foundation".to_string(),
            scholarship_type: "Academic".to_string(),
            min_gpa: 3.5,
            eligible_courses: vec![
                "Computer Science".to_string(),
                "Information Technology".to_string(),
            ],
            eligible_year_levels: vec!["3rd Year".to_string(), "4th Year".to_string()],
            income_ceiling: None,
            required_skills: vec!["programming".to_string()],
            slots_total: 10,
            slots_filled: 4,
        },
        ScholarshipCriteria {
            scholarship_id: ScholarshipId("demo-need".to_string()),
            name: "Community Uplift Fund".to_string(),
            organization: "City Hall".to_string(),
            scholarship_type: "Need-Based".to_string(),
            min_gpa: 2.5,
            eligible_courses: Vec::new(),
            eligible_year_levels: Vec::new(),
            income_ceiling: Some(20_000.0),
            required_skills: Vec::new(),
            slots_total: 30,
            slots_filled: 11,
        },
        ScholarshipCriteria {
            scholarship_id: ScholarshipId("demo-arts".to_string()),
            name: "Creative Arts Scholarship".to_string(),
            organization: "Gallery Trust".to_string(),
            scholarship_type: "Talent".to_string(),
            min_gpa: 3.0,
            eligible_courses: vec!["Fine Arts".to_string(), "Multimedia Arts".to_string()],
            eligible_year_levels: Vec::new(),
            income_ceiling: None,
            required_skills: vec!["portfolio".to_string()],
            slots_total: 5,
            slots_filled: 5,
        },
    ]
}

fn demo_applications() -> Vec<ApplicantProfile> {
    vec![
        ApplicantProfile {
            application_id: ApplicationId("demo-app-1".to_string()),
            student_name: "Ana Reyes".to_string(),
            gpa: 3.9,
            income_range: "Below 10,000".to_string(),
            skills: "Programming, tutoring".to_string(),
            essay: "I tutor neighborhood kids every weekend.".to_string(),
        },
        ApplicantProfile {
            application_id: ApplicationId("demo-app-2".to_string()),
            student_name: "Ben Cruz".to_string(),
            gpa: 3.5,
            income_range: "20,001 - 30,000".to_string(),
            skills: "Robotics".to_string(),
            essay: "Building things is how I learn.".to_string(),
        },
        ApplicantProfile {
            application_id: ApplicationId("demo-app-3".to_string()),
            student_name: "Carla Santos".to_string(),
            gpa: 3.1,
            income_range: "Below 10,000".to_string(),
            skills: "Writing".to_string(),
            essay: "Education is the way out for my family.".to_string(),
        },
    ]
}
