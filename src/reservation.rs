// Reservation Engine: seat allocation, booking and cancellation

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::state::AppState;
use crate::transaction_log::TIMESTAMP_FORMAT;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Train number {0} does not exist.")]
    TrainNotFound(usize),

    #[error("Coach '{coach}' does not exist on {train}.")]
    CoachNotFound { train: String, coach: String },

    #[error("No seats available in {coach} on {train}.")]
    NoSeatsAvailable { train: String, coach: String },

    #[error("No booking found for ticket #{ticket_id} with the given CNIC.")]
    TicketNotFound { ticket_id: u32 },

    #[error("Invalid passenger details: {0}")]
    InvalidPassenger(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub ticket_id: u32,
    pub name: String,
    pub cnic: String,
    pub age: u32,
    pub gender: String,
    pub seat_class: String,
    // 1-based index into the coach's seat pool
    pub seat_number: usize,
    pub train_name: String,
    pub coach_name: String,
    pub ticket_price: u32,
    pub booking_time: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub name: String,
    pub cnic: String,
    pub age: u32,
    pub gender: String,
    pub train_no: usize,
    pub coach: String,
}

pub fn book_ticket(
    state: &mut AppState,
    request: BookingRequest,
) -> Result<Passenger, ReservationError> {
    if request.name.trim().is_empty() {
        return Err(ReservationError::InvalidPassenger(
            "name must not be empty".to_string(),
        ));
    }
    if request.cnic.trim().is_empty() {
        return Err(ReservationError::InvalidPassenger(
            "CNIC must not be empty".to_string(),
        ));
    }

    let train = state
        .train_mut(request.train_no)
        .ok_or(ReservationError::TrainNotFound(request.train_no))?;
    let train_name = train.name.clone();

    let coach = train
        .coach_mut(&request.coach)
        .ok_or_else(|| ReservationError::CoachNotFound {
            train: train_name.clone(),
            coach: request.coach.clone(),
        })?;

    let seat_number = coach
        .first_free_seat()
        .ok_or_else(|| ReservationError::NoSeatsAvailable {
            train: train_name.clone(),
            coach: coach.name.clone(),
        })?;
    coach.seats[seat_number - 1] = true;
    let ticket_price = coach.price;
    let coach_name = coach.name.clone();

    let passenger = Passenger {
        ticket_id: state.issue_ticket_id(),
        name: request.name.trim().to_string(),
        cnic: request.cnic.trim().to_string(),
        age: request.age,
        gender: request.gender,
        seat_class: coach_name.clone(),
        seat_number,
        train_name,
        coach_name,
        ticket_price,
        booking_time: Local::now(),
    };

    state.transactions.record(&format!(
        "Booked ticket #{} for {} (CNIC {}) on {} {} seat {}",
        passenger.ticket_id,
        passenger.name,
        passenger.cnic,
        passenger.train_name,
        passenger.coach_name,
        passenger.seat_number
    ));
    tracing::info!(
        ticket_id = passenger.ticket_id,
        train = %passenger.train_name,
        coach = %passenger.coach_name,
        seat = passenger.seat_number,
        "ticket booked"
    );

    state.passengers.push(passenger.clone());
    Ok(passenger)
}

// A booking is identified by its ticket number; the CNIC must match the holder
pub fn cancel_ticket(
    state: &mut AppState,
    ticket_id: u32,
    cnic: &str,
) -> Result<Passenger, ReservationError> {
    let index = state
        .passengers
        .iter()
        .position(|p| p.ticket_id == ticket_id && p.cnic == cnic.trim())
        .ok_or(ReservationError::TicketNotFound { ticket_id })?;
    let passenger = state.passengers.remove(index);

    let seat = state
        .trains
        .iter_mut()
        .find(|t| t.name == passenger.train_name)
        .and_then(|t| t.coach_mut(&passenger.coach_name))
        .and_then(|c| c.seats.get_mut(passenger.seat_number - 1));
    match seat {
        Some(occupied) => *occupied = false,
        None => tracing::warn!(
            ticket_id,
            train = %passenger.train_name,
            coach = %passenger.coach_name,
            "seat of cancelled ticket no longer exists"
        ),
    }

    state.transactions.record(&format!(
        "Cancelled ticket #{} for {} (CNIC {}) on {} {} seat {}",
        passenger.ticket_id,
        passenger.name,
        passenger.cnic,
        passenger.train_name,
        passenger.coach_name,
        passenger.seat_number
    ));
    tracing::info!(ticket_id, "ticket cancelled");

    Ok(passenger)
}

pub fn render_booked_tickets(passengers: &[Passenger]) -> String {
    let mut out = String::from("\nBooked Tickets:\n");
    if passengers.is_empty() {
        out.push_str("No tickets booked yet.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<8}{:<20}{:<17}{:<5}{:<8}{:<20}{:<12}{:<6}{:<8}Booked At\n",
        "Ticket", "Name", "CNIC", "Age", "Gender", "Train", "Coach", "Seat", "Price"
    ));
    out.push_str(&"-".repeat(128));
    out.push('\n');

    for p in passengers {
        out.push_str(&format!(
            "{:<8}{:<20}{:<17}{:<5}{:<8}{:<20}{:<12}{:<6}{:<8}{}\n",
            p.ticket_id,
            p.name,
            p.cnic,
            p.age,
            p.gender,
            p.train_name,
            p.coach_name,
            p.seat_number,
            p.ticket_price,
            p.booking_time.format(TIMESTAMP_FORMAT)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, cnic: &str, train_no: usize, coach: &str) -> BookingRequest {
        BookingRequest {
            name: name.to_string(),
            cnic: cnic.to_string(),
            age: 30,
            gender: "F".to_string(),
            train_no,
            coach: coach.to_string(),
        }
    }

    fn free_seats(state: &AppState, train_no: usize, coach: &str) -> usize {
        state
            .train(train_no)
            .and_then(|t| t.coach(coach))
            .map(|c| c.free_seats())
            .unwrap()
    }

    #[test]
    fn test_booking_takes_lowest_free_seat() {
        let mut state = AppState::default();

        let first = book_ticket(&mut state, request("Ayesha", "35202-1", 1, "Economy")).unwrap();
        let second = book_ticket(&mut state, request("Bilal", "35202-2", 1, "Economy")).unwrap();

        assert_eq!(first.seat_number, 1);
        assert_eq!(second.seat_number, 2);
        assert_eq!(first.ticket_price, 1000);
        assert_eq!(first.seat_class, "Economy");
        assert_ne!(first.ticket_id, second.ticket_id);
        assert_eq!(free_seats(&state, 1, "Economy"), 8);
        assert_eq!(free_seats(&state, 1, "Business"), 10);
        assert_eq!(state.passengers.len(), 2);
        assert_eq!(state.transactions.len(), 2);
    }

    #[test]
    fn test_booking_reuses_seat_freed_by_cancellation() {
        let mut state = AppState::default();
        let a = book_ticket(&mut state, request("A", "1", 2, "Business")).unwrap();
        let b = book_ticket(&mut state, request("B", "2", 2, "Business")).unwrap();
        book_ticket(&mut state, request("C", "3", 2, "Business")).unwrap();

        cancel_ticket(&mut state, a.ticket_id, "1").unwrap();
        let d = book_ticket(&mut state, request("D", "4", 2, "Business")).unwrap();

        assert_eq!(d.seat_number, a.seat_number);
        assert_ne!(d.seat_number, b.seat_number);
        assert_eq!(free_seats(&state, 2, "Business"), 7);
    }

    #[test]
    fn test_booking_full_coach_fails() {
        let mut state = AppState::default();
        for i in 0..10 {
            book_ticket(&mut state, request("P", &i.to_string(), 3, "Economy")).unwrap();
        }

        let err = book_ticket(&mut state, request("Late", "99", 3, "Economy")).unwrap_err();
        assert_eq!(
            err,
            ReservationError::NoSeatsAvailable {
                train: "Red Arrow".to_string(),
                coach: "Economy".to_string(),
            }
        );
        assert_eq!(state.passengers.len(), 10);
        assert_eq!(state.next_ticket_id, 11);
    }

    #[test]
    fn test_booking_unknown_train_or_coach() {
        let mut state = AppState::default();

        assert_eq!(
            book_ticket(&mut state, request("A", "1", 0, "Economy")).unwrap_err(),
            ReservationError::TrainNotFound(0)
        );
        assert_eq!(
            book_ticket(&mut state, request("A", "1", 9, "Economy")).unwrap_err(),
            ReservationError::TrainNotFound(9)
        );
        assert!(matches!(
            book_ticket(&mut state, request("A", "1", 1, "economy")),
            Err(ReservationError::CoachNotFound { .. })
        ));
        assert!(matches!(
            book_ticket(&mut state, request("  ", "1", 1, "Economy")),
            Err(ReservationError::InvalidPassenger(_))
        ));
        assert!(state.passengers.is_empty());
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn test_cancel_restores_seat_and_removes_one_record() {
        let mut state = AppState::default();
        let kept = book_ticket(&mut state, request("Kept", "111", 1, "Economy")).unwrap();
        let gone = book_ticket(&mut state, request("Gone", "222", 1, "Economy")).unwrap();

        let cancelled = cancel_ticket(&mut state, gone.ticket_id, "222").unwrap();
        assert_eq!(cancelled.name, "Gone");
        assert_eq!(state.passengers.len(), 1);
        assert_eq!(state.passengers[0].ticket_id, kept.ticket_id);
        assert_eq!(free_seats(&state, 1, "Economy"), 9);

        let seats = &state.train(1).unwrap().coach("Economy").unwrap().seats;
        assert!(seats[kept.seat_number - 1]);
        assert!(!seats[gone.seat_number - 1]);
    }

    #[test]
    fn test_cancel_unknown_booking_leaves_state_untouched() {
        let mut state = AppState::default();
        let booked = book_ticket(&mut state, request("A", "111", 1, "Economy")).unwrap();
        let before = state.trains.clone();
        let logs_before = state.transactions.len();

        assert_eq!(
            cancel_ticket(&mut state, booked.ticket_id, "999").unwrap_err(),
            ReservationError::TicketNotFound {
                ticket_id: booked.ticket_id
            }
        );
        assert!(cancel_ticket(&mut state, 42, "111").is_err());

        assert_eq!(state.trains, before);
        assert_eq!(state.passengers.len(), 1);
        assert_eq!(state.transactions.len(), logs_before);
    }

    #[test]
    fn test_cnic_is_matched_without_surrounding_whitespace() {
        let mut state = AppState::default();
        let booked = book_ticket(&mut state, request(" Hina ", " 123 ", 1, "Business")).unwrap();
        assert_eq!(booked.cnic, "123");
        assert_eq!(booked.name, "Hina");

        let cancelled = cancel_ticket(&mut state, booked.ticket_id, " 123 ").unwrap();
        assert_eq!(cancelled.ticket_id, booked.ticket_id);
        assert!(state.passengers.is_empty());
        assert_eq!(free_seats(&state, 1, "Business"), 10);
    }

    #[test]
    fn test_render_booked_tickets() {
        let mut state = AppState::default();
        assert!(render_booked_tickets(&state.passengers).contains("No tickets booked yet."));

        book_ticket(&mut state, request("Ayesha Khan", "35202-1234567-1", 1, "Business")).unwrap();
        let table = render_booked_tickets(&state.passengers);
        assert!(table.contains("Ayesha Khan"));
        assert!(table.contains("35202-1234567-1"));
        assert!(table.contains("Green Express"));
        assert!(table.contains("2000"));
    }
}
