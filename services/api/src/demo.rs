use std::sync::{Arc, Barrier};

use clap::Args;
use ewaste::error::AppError;
use ewaste::lifecycle::{
    AddressDraft, CollectionDraft, CollectionStatus, CollectionView, DashboardView, DonationDraft,
    DonationStatus, DonationView, ItemDraft, LifecycleError, Principal, PrincipalId,
    PrincipalSummary, Role,
};

use crate::infra::{lifecycle_state, InMemoryPrincipalDirectory};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of simultaneous claimants racing for the demo donation
    #[arg(long, default_value_t = 8)]
    pub(crate) claimants: usize,
}

fn principal(id: &str, role: Role) -> Principal {
    Principal {
        id: PrincipalId(id.to_string()),
        role,
    }
}

fn register(directory: &InMemoryPrincipalDirectory, id: &str, name: &str) {
    directory.register(PrincipalSummary {
        id: PrincipalId(id.to_string()),
        name: Some(name.to_string()),
        email: Some(format!("{id}@example.org")),
        phone: None,
    });
}

fn pickup_address() -> AddressDraft {
    AddressDraft {
        street: Some("14 MG Road".to_string()),
        city: Some("Bengaluru".to_string()),
        state: Some("Karnataka".to_string()),
        zip_code: Some("560001".to_string()),
        country: None,
        landmark: Some("Opposite metro station".to_string()),
    }
}

/// Walk both lifecycles end to end: a collection request from intake to
/// completion, and a donation through a contended reservation to delivery.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let directory = Arc::new(InMemoryPrincipalDirectory::default());
    register(&directory, "asha", "Asha Rao");
    register(&directory, "bina", "Bina Shah");
    register(&directory, "kiran", "Kiran Kumar");

    let state = lifecycle_state(directory.clone());
    let asha = principal("asha", Role::User);
    let bina = principal("bina", Role::User);
    let kiran = principal("kiran", Role::Collector);

    println!("E-waste lifecycle demo\n");

    let collection = state.collections.create(
        &asha,
        &CollectionDraft {
            items: vec![ItemDraft {
                category: Some("laptop".to_string()),
                brand: Some("ThinkPad".to_string()),
                quantity: Some(2),
                estimated_value: Some(500.0),
                ..ItemDraft::default()
            }],
            pickup_address: Some(pickup_address()),
            preferred_date: Some("2026-09-15".to_string()),
            preferred_time_slot: Some("morning".to_string()),
            notes: None,
        },
    )?;
    println!(
        "Collection request created:\n{}\n",
        serde_json::to_string_pretty(&CollectionView::build(&collection, directory.as_ref()))
            .expect("view serializes")
    );

    for status in [
        CollectionStatus::Scheduled,
        CollectionStatus::InProgress,
        CollectionStatus::Completed,
    ] {
        let updated =
            state
                .collections
                .transition_status(&kiran, &collection.id, status, None)?;
        println!("Collection moved to {}", updated.status.label());
    }

    let donation = state.donations.create(
        &bina,
        &DonationDraft {
            items: vec![ItemDraft {
                category: Some("mobile".to_string()),
                condition: Some("good".to_string()),
                quantity: Some(1),
                estimated_value: Some(150.0),
                ..ItemDraft::default()
            }],
            pickup_address: Some(pickup_address()),
            preferred_date: Some("2026-09-20".to_string()),
            preferred_time_slot: Some("evening".to_string()),
            donation_purpose: Some("education".to_string()),
            notes: None,
        },
    )?;
    println!(
        "\nDonation published to the shared pool: {} ({})",
        donation.id.0,
        donation.status.label()
    );

    let claimants = args.claimants.max(2);
    println!("{claimants} claimants race to reserve it...");
    let barrier = Arc::new(Barrier::new(claimants));
    let handles: Vec<_> = (0..claimants)
        .map(|index| {
            let donations = Arc::clone(&state.donations);
            let barrier = Arc::clone(&barrier);
            let id = donation.id.clone();
            std::thread::spawn(move || {
                let claimant = principal(&format!("claimant-{index}"), Role::User);
                barrier.wait();
                donations.reserve(&claimant, &id)
            })
        })
        .collect();

    let mut conflicts = 0;
    for handle in handles {
        match handle.join().expect("claimant thread completes") {
            Ok(reserved) => println!(
                "  winner: {}",
                reserved.recipient_id.expect("winner has recipient").0
            ),
            Err(LifecycleError::Conflict(_)) => conflicts += 1,
            Err(other) => return Err(other.into()),
        }
    }
    println!("  conflicts: {conflicts}");

    for status in [DonationStatus::PickedUp, DonationStatus::Delivered] {
        let updated = state
            .donations
            .transition_status(&kiran, &donation.id, status, None)?;
        println!("Donation moved to {}", updated.status.label());
    }
    println!(
        "\nDonation after delivery:\n{}",
        serde_json::to_string_pretty(&DonationView::build(
            &state.donations.get(&kiran, &donation.id)?,
            directory.as_ref(),
        ))
        .expect("view serializes")
    );

    let summary = state.dashboard.summarize(&bina)?;
    println!(
        "\nBina's dashboard:\n{}",
        serde_json::to_string_pretty(&DashboardView::build(&summary, directory.as_ref()))
            .expect("view serializes")
    );

    Ok(())
}
