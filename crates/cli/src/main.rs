use chrono::Utc;
use clap::{Parser, Subcommand};
use medq_core::{
    config::hospital_id_from_env_value, CoreConfig, DoctorService, DoctorStatus, NewDoctor,
    NewVisit, TriageCategory, VisitService, VisitStatus, VisitType, DEFAULT_QUEUE_DATA_DIR,
};
use medq_types::Score;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medq")]
#[command(about = "MedQ patient queue CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a patient in
    CheckIn {
        /// Patient UUID
        patient_id: Uuid,
        /// Doctor UUID the visit is assigned to
        doctor_id: Uuid,
        /// Visit type (WALK_IN, APPOINTMENT, EMERGENCY, FOLLOW_UP)
        visit_type: String,
        /// Triage category (RED, YELLOW, GREEN)
        #[arg(long)]
        triage: Option<String>,
        /// Manual override bonus; setting it also sets the override flag
        #[arg(long)]
        override_weight: Option<Score>,
    },
    /// Transition a visit's status
    Transition {
        /// Visit UUID
        visit_id: Uuid,
        /// Target status (WAITING, IN_CONSULT, COMPLETED, SKIPPED, NO_SHOW, DROPPED_OUT)
        status: String,
    },
    /// Show one doctor's active queue in serving order
    Queue {
        /// Doctor UUID
        doctor_id: Uuid,
    },
    /// List all stored visits, history included
    ListVisits,
    /// Register a doctor
    RegisterDoctor {
        /// Doctor name
        name: String,
        /// Specialization
        specialization: String,
        /// Average consult duration in minutes
        #[arg(long, default_value_t = 15)]
        average_consult_minutes: u32,
    },
    /// List all registered doctors
    ListDoctors,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let queue_data_dir = PathBuf::from(
        std::env::var("MEDQ_DATA_DIR").unwrap_or_else(|_| DEFAULT_QUEUE_DATA_DIR.into()),
    );
    let hospital_id = hospital_id_from_env_value(std::env::var("MEDQ_HOSPITAL_ID").ok())?;
    let cfg = Arc::new(CoreConfig::new(queue_data_dir, hospital_id)?);

    let visit_service = VisitService::new(cfg.clone());
    let doctor_service = DoctorService::new(cfg);

    match cli.command {
        Some(Commands::CheckIn {
            patient_id,
            doctor_id,
            visit_type,
            triage,
            override_weight,
        }) => {
            let new_visit = NewVisit {
                patient_id,
                doctor_id,
                visit_type: VisitType::from_wire(&visit_type),
                triage_category: triage.as_deref().map(TriageCategory::from_wire),
                override_flag: override_weight.is_some(),
                override_weight,
            };
            match visit_service.check_in(new_visit, Utc::now()) {
                Ok(visit) => println!(
                    "Checked in visit {} (score {})",
                    visit.id, visit.priority_score
                ),
                Err(e) => eprintln!("Error checking in: {}", e),
            }
        }
        Some(Commands::Transition { visit_id, status }) => {
            let Some(next) = VisitStatus::from_wire(&status) else {
                eprintln!("Unknown status: {}", status);
                std::process::exit(1);
            };
            match visit_service.transition(visit_id, next, Utc::now()) {
                Ok(visit) => println!("Visit {} is now {}", visit.id, visit.status),
                Err(e) => eprintln!("Error transitioning visit: {}", e),
            }
        }
        Some(Commands::Queue { doctor_id }) => {
            let queue = visit_service.doctor_queue(doctor_id, Utc::now());
            if queue.is_empty() {
                println!("Queue is empty.");
            } else {
                for (position, visit) in queue.iter().enumerate() {
                    println!(
                        "{}. {} patient {} ({}, score {}, checked in {})",
                        position + 1,
                        visit.visit_type,
                        visit.patient_id,
                        visit.status,
                        visit.priority_score,
                        visit.check_in_time.to_rfc3339()
                    );
                }
            }
        }
        Some(Commands::ListVisits) => {
            let visits = visit_service.list();
            if visits.is_empty() {
                println!("No visits found.");
            } else {
                for visit in visits {
                    println!(
                        "ID: {}, Doctor: {}, Type: {}, Status: {}",
                        visit.id, visit.doctor_id, visit.visit_type, visit.status
                    );
                }
            }
        }
        Some(Commands::RegisterDoctor {
            name,
            specialization,
            average_consult_minutes,
        }) => {
            let new_doctor = NewDoctor {
                name,
                specialization,
                status: DoctorStatus::Available,
                average_consult_minutes,
            };
            match doctor_service.register(new_doctor) {
                Ok(doctor) => println!("Registered doctor {} ({})", doctor.name, doctor.id),
                Err(e) => eprintln!("Error registering doctor: {}", e),
            }
        }
        Some(Commands::ListDoctors) => {
            let doctors = doctor_service.list();
            if doctors.is_empty() {
                println!("No doctors found.");
            } else {
                for doctor in doctors {
                    println!(
                        "ID: {}, Name: {}, Specialization: {}, Status: {}",
                        doctor.id, doctor.name, doctor.specialization, doctor.status
                    );
                }
            }
        }
        None => {
            println!("Use 'medq --help' for commands");
        }
    }

    Ok(())
}
