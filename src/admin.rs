// Admin Operations: catalog mutation, delay notifications and revenue reporting

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::catalog::{Coach, Train, MAX_COACH_SEATS};
use crate::config::AdminCredentials;
use crate::state::AppState;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdminError {
    #[error("Train number {0} does not exist.")]
    TrainNotFound(usize),

    #[error("A train named '{0}' already exists.")]
    DuplicateTrain(String),

    #[error("Coach '{coach}' is listed more than once.")]
    DuplicateCoach { coach: String },

    #[error("Coach '{coach}' does not exist on {train}.")]
    CoachNotFound { train: String, coach: String },

    #[error("Seat count must be between 1 and {}.", MAX_COACH_SEATS)]
    InvalidSeatCount,

    #[error("Cannot remove seats from {coach}: seat {seat} is booked.")]
    SeatsInUse { coach: String, seat: usize },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

// Everything needed to register a train; coaches are (name, seats, price)
#[derive(Debug, Clone, Default)]
pub struct NewTrain {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub coaches: Vec<(String, usize, u32)>,
}

pub fn verify_login(credentials: &AdminCredentials, username: &str, password: &str) -> bool {
    let ok = credentials.username == username && credentials.password == password;
    if !ok {
        tracing::warn!(username, "admin login rejected");
    }
    ok
}

fn check_seats(seats: usize) -> Result<(), AdminError> {
    if seats == 0 || seats > MAX_COACH_SEATS {
        Err(AdminError::InvalidSeatCount)
    } else {
        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AdminError> {
    if value.trim().is_empty() {
        Err(AdminError::MissingField(field))
    } else {
        Ok(())
    }
}

pub fn update_train_route(
    state: &mut AppState,
    train_no: usize,
    source: &str,
    destination: &str,
) -> Result<(), AdminError> {
    require(source, "source")?;
    require(destination, "destination")?;

    let train = state
        .train_mut(train_no)
        .ok_or(AdminError::TrainNotFound(train_no))?;
    train.source = source.trim().to_string();
    train.destination = destination.trim().to_string();

    let message = format!(
        "Updated route of {} to {} -> {}",
        train.name, train.source, train.destination
    );
    tracing::info!(train_no, "train route updated");
    state.transactions.record(&message);
    Ok(())
}

pub fn add_train(state: &mut AppState, new_train: NewTrain) -> Result<(), AdminError> {
    require(&new_train.name, "train name")?;
    require(&new_train.source, "source")?;
    require(&new_train.destination, "destination")?;

    let name = new_train.name.trim();
    if state.trains.iter().any(|t| t.name == name) {
        return Err(AdminError::DuplicateTrain(name.to_string()));
    }

    let mut seen = HashSet::new();
    let mut coaches = Vec::with_capacity(new_train.coaches.len());
    for (coach, seats, price) in &new_train.coaches {
        let coach = coach.trim();
        require(coach, "coach name")?;
        check_seats(*seats)?;
        if !seen.insert(coach) {
            return Err(AdminError::DuplicateCoach {
                coach: coach.to_string(),
            });
        }
        coaches.push(Coach::new(coach, *seats, *price));
    }

    let train = Train::new(
        name,
        new_train.source.trim(),
        new_train.destination.trim(),
        coaches,
    );
    state.transactions.record(&format!(
        "Added new train: {} ({} -> {}) with {} coach(es)",
        train.name,
        train.source,
        train.destination,
        train.coaches.len()
    ));
    tracing::info!(train = %train.name, "train added");
    state.trains.push(train);
    Ok(())
}

// Existing coach: the price is replaced. New coach: appended with `seats` free seats.
pub fn upsert_coach(
    state: &mut AppState,
    train_no: usize,
    coach: &str,
    seats: usize,
    price: u32,
) -> Result<(), AdminError> {
    let coach = coach.trim();
    require(coach, "coach name")?;

    let train = state
        .train_mut(train_no)
        .ok_or(AdminError::TrainNotFound(train_no))?;
    let train_name = train.name.clone();

    let message = match train.coach_mut(coach) {
        Some(existing) => {
            let old = existing.price;
            existing.price = price;
            format!(
                "Updated price of {} on {} from {} to {}",
                coach, train_name, old, price
            )
        }
        None => {
            check_seats(seats)?;
            train.coaches.push(Coach::new(coach, seats, price));
            format!(
                "Added coach {} to {} with {} seats at {}",
                coach, train_name, seats, price
            )
        }
    };

    tracing::info!(train_no, coach, "coach updated");
    state.transactions.record(&message);
    Ok(())
}

// Resize a coach's seat pool. Only free seats at the tail may be dropped.
pub fn update_seats(
    state: &mut AppState,
    train_no: usize,
    coach: &str,
    seats: usize,
) -> Result<(), AdminError> {
    check_seats(seats)?;

    let train = state
        .train_mut(train_no)
        .ok_or(AdminError::TrainNotFound(train_no))?;
    let train_name = train.name.clone();
    let target = train
        .coach_mut(coach.trim())
        .ok_or_else(|| AdminError::CoachNotFound {
            train: train_name.clone(),
            coach: coach.trim().to_string(),
        })?;

    if let Some(booked) = target.seats.iter().skip(seats).position(|occupied| *occupied) {
        return Err(AdminError::SeatsInUse {
            coach: target.name.clone(),
            seat: seats + booked + 1,
        });
    }

    let old = target.seat_count();
    target.seats.resize(seats, false);
    let message = format!(
        "Updated seats of {} on {} from {} to {}",
        target.name, train_name, old, seats
    );

    tracing::info!(train_no, coach, seats, "seat pool resized");
    state.transactions.record(&message);
    Ok(())
}

pub fn update_train_delay(state: &mut AppState, train_name: &str, delayed: bool) {
    let train_name = train_name.trim();
    state.train_delays.insert(train_name.to_string(), delayed);
    state.transactions.record(&format!(
        "Updated delay status for train: {} to {}",
        train_name,
        delay_label(delayed)
    ));
    tracing::info!(train = train_name, delayed, "delay status updated");
}

fn delay_label(delayed: bool) -> &'static str {
    if delayed {
        "Delayed"
    } else {
        "On Time"
    }
}

pub fn render_delay_notifications(delays: &BTreeMap<String, bool>) -> String {
    let mut out = String::from("\nTrain Delay Notifications:\n");
    if delays.is_empty() {
        out.push_str("No delay notifications at the moment.\n");
        return out;
    }
    for (train, delayed) in delays {
        out.push_str(&format!("Train: {} - {}\n", train, delay_label(*delayed)));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueLine {
    pub train: String,
    pub coach: String,
    pub revenue: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueReport {
    pub lines: Vec<RevenueLine>,
    pub total: u64,
}

impl RevenueReport {
    pub fn coach_revenue(&self, train: &str, coach: &str) -> Option<u64> {
        self.lines
            .iter()
            .find(|l| l.train == train && l.coach == coach)
            .map(|l| l.revenue)
    }
}

pub fn revenue_report(trains: &[Train]) -> RevenueReport {
    let lines: Vec<RevenueLine> = trains
        .iter()
        .flat_map(|train| {
            train.coaches.iter().map(move |coach| RevenueLine {
                train: train.name.clone(),
                coach: coach.name.clone(),
                revenue: coach.revenue(),
            })
        })
        .collect();
    let total = lines.iter().map(|l| l.revenue).sum();

    RevenueReport { lines, total }
}

pub fn render_revenue_report(report: &RevenueReport) -> String {
    let mut out = String::from("\nRevenue Report:\n");
    out.push_str(&format!("{:<20}{:<15}Revenue\n", "Train Name", "Coach"));
    out.push_str(&"-".repeat(42));
    out.push('\n');
    for line in &report.lines {
        out.push_str(&format!(
            "{:<20}{:<15}{}\n",
            line.train, line.coach, line.revenue
        ));
    }
    out.push_str(&"-".repeat(42));
    out.push('\n');
    out.push_str(&format!("Total Revenue: {}\n", report.total));
    out
}
