// Presentation/Menu Loop: numeric text menus dispatching to the operations

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::admin::{self, NewTrain};
use crate::catalog::render_trains;
use crate::config::AdminCredentials;
use crate::reservation::{self, BookingRequest};
use crate::state::AppState;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("end of input")]
    EndOfInput,

    #[error("Invalid input.")]
    InvalidInput,
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    // Returns the trimmed line; a closed input is reported as `EndOfInput`
    pub fn prompt(&mut self, label: &str) -> Result<String, MenuError> {
        self.output.write_all(label.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt_parse<T: FromStr>(&mut self, label: &str) -> Result<T, MenuError> {
        self.prompt(label)?
            .parse()
            .map_err(|_| MenuError::InvalidInput)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

const MAIN_MENU: &str = "\nRailway Reservation System\n\
1. View Available Trains\n\
2. Book Ticket\n\
3. View Booked Tickets\n\
4. Cancel Ticket\n\
5. Admin Portal\n\
6. Exit\n";

const ADMIN_MENU: &str = "\nAdmin Portal\n\
1. View All Trains\n\
2. View Booked Tickets\n\
3. Update Train Source/Destination\n\
4. Add New Train\n\
5. Update or Add Coaches/Classes\n\
6. Update or Add Seats in Coaches/Trains\n\
7. Notify Train Delays\n\
8. Generate Revenue Report\n\
9. View Transaction Logs\n\
10. Logout\n";

const INVALID_CHOICE: &str = "Invalid choice. Try again.\n";

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    state: AppState,
    admin: AdminCredentials,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(state: AppState, admin: AdminCredentials, console: Console<R, W>) -> Self {
        Self {
            state,
            admin,
            console,
        }
    }

    pub fn into_parts(self) -> (AppState, W) {
        (self.state, self.console.into_output())
    }

    // Runs until the user exits or input is exhausted
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.print(MAIN_MENU)?;
            let choice = match self.console.prompt("Enter your choice: ") {
                Ok(choice) => choice,
                Err(MenuError::IoError(e)) => return Err(e),
                Err(_) => break,
            };
            tracing::debug!(choice = %choice, "main menu");

            let outcome = match choice.parse::<u32>() {
                Ok(1) => self.display_trains(),
                Ok(2) => self.book_ticket(),
                Ok(3) => self.view_booked_tickets(),
                Ok(4) => self.cancel_ticket(),
                Ok(5) => self.admin_portal(),
                Ok(6) => {
                    self.console.print("Exiting the system...\n")?;
                    break;
                }
                _ => self.console.print(INVALID_CHOICE).map_err(MenuError::from),
            };

            if let Flow::Exit = self.settle(outcome)? {
                break;
            }
        }
        Ok(())
    }

    // Field-level input errors abort the current operation only
    fn settle(&mut self, outcome: Result<(), MenuError>) -> io::Result<Flow> {
        match outcome {
            Ok(()) => Ok(Flow::Continue),
            Err(MenuError::InvalidInput) => {
                self.console.print("Invalid input.\n")?;
                Ok(Flow::Continue)
            }
            Err(MenuError::EndOfInput) => Ok(Flow::Exit),
            Err(MenuError::IoError(e)) => Err(e),
        }
    }

    fn report<E: std::fmt::Display>(&mut self, result: Result<String, E>) -> Result<(), MenuError> {
        let text = match result {
            Ok(message) => message,
            Err(e) => e.to_string(),
        };
        self.console.print(&text)?;
        self.console.print("\n")?;
        Ok(())
    }

    fn display_trains(&mut self) -> Result<(), MenuError> {
        self.console.print(&render_trains(&self.state.trains))?;
        self.console
            .print(&admin::render_delay_notifications(&self.state.train_delays))?;
        Ok(())
    }

    fn view_booked_tickets(&mut self) -> Result<(), MenuError> {
        self.console
            .print(&reservation::render_booked_tickets(&self.state.passengers))?;
        Ok(())
    }

    fn book_ticket(&mut self) -> Result<(), MenuError> {
        self.console.print(&render_trains(&self.state.trains))?;

        let request = BookingRequest {
            name: self.console.prompt("Enter Passenger Name: ")?,
            cnic: self.console.prompt("Enter CNIC: ")?,
            age: self.console.prompt_parse("Enter Age: ")?,
            gender: self.console.prompt("Enter Gender: ")?,
            train_no: self.console.prompt_parse("Enter Train Number: ")?,
            coach: self.console.prompt("Enter Class (e.g. Business, Economy): ")?,
        };

        let result = reservation::book_ticket(&mut self.state, request).map(|p| {
            format!(
                "Ticket booked successfully! Ticket ID: {}, Train: {}, Coach: {}, Seat Number: {}, Price: {}",
                p.ticket_id, p.train_name, p.coach_name, p.seat_number, p.ticket_price
            )
        });
        self.report(result)
    }

    fn cancel_ticket(&mut self) -> Result<(), MenuError> {
        let ticket_id: u32 = self.console.prompt_parse("Enter Ticket ID: ")?;
        let cnic = self.console.prompt("Enter CNIC: ")?;

        let result = reservation::cancel_ticket(&mut self.state, ticket_id, &cnic).map(|p| {
            format!(
                "Ticket #{} cancelled. Seat {} in {} on {} is available again.",
                p.ticket_id, p.seat_number, p.coach_name, p.train_name
            )
        });
        self.report(result)
    }

    fn admin_portal(&mut self) -> Result<(), MenuError> {
        let username = self.console.prompt("Enter admin username: ")?;
        let password = self.console.prompt("Enter admin password: ")?;
        if !admin::verify_login(&self.admin, &username, &password) {
            self.console.print("Invalid credentials. Access denied.\n")?;
            return Ok(());
        }
        tracing::info!(username = %username, "admin logged in");

        loop {
            self.console.print(ADMIN_MENU)?;
            let choice = self.console.prompt("Enter your choice: ")?;
            tracing::debug!(choice = %choice, "admin menu");

            let outcome = match choice.parse::<u32>() {
                Ok(1) => self.display_trains(),
                Ok(2) => self.view_booked_tickets(),
                Ok(3) => self.update_train_route(),
                Ok(4) => self.add_train(),
                Ok(5) => self.upsert_coach(),
                Ok(6) => self.update_seats(),
                Ok(7) => self.update_train_delay(),
                Ok(8) => self.revenue_report(),
                Ok(9) => self.view_transaction_logs(),
                Ok(10) => {
                    self.console.print("Logging out...\n")?;
                    return Ok(());
                }
                _ => self.console.print(INVALID_CHOICE).map_err(MenuError::from),
            };

            match outcome {
                Err(MenuError::InvalidInput) => self.console.print("Invalid input.\n")?,
                other => other?,
            }
        }
    }

    fn update_train_route(&mut self) -> Result<(), MenuError> {
        let train_no: usize = self.console.prompt_parse("Enter Train Number: ")?;
        let source = self.console.prompt("Enter New Source: ")?;
        let destination = self.console.prompt("Enter New Destination: ")?;

        let result = admin::update_train_route(&mut self.state, train_no, &source, &destination)
            .map(|()| "Train route updated successfully.".to_string());
        self.report(result)
    }

    fn add_train(&mut self) -> Result<(), MenuError> {
        let mut new_train = NewTrain {
            name: self.console.prompt("Enter Train Name: ")?,
            source: self.console.prompt("Enter Source: ")?,
            destination: self.console.prompt("Enter Destination: ")?,
            coaches: vec![],
        };

        let count: usize = self.console.prompt_parse("Enter Number of Coaches: ")?;
        for i in 1..=count {
            let name = self.console.prompt(&format!("Coach {} Name: ", i))?;
            let seats: usize = self.console.prompt_parse(&format!("Coach {} Seats: ", i))?;
            let price: u32 = self.console.prompt_parse(&format!("Coach {} Ticket Price: ", i))?;
            new_train.coaches.push((name, seats, price));
        }

        let result = admin::add_train(&mut self.state, new_train)
            .map(|()| "New train added successfully.".to_string());
        self.report(result)
    }

    fn upsert_coach(&mut self) -> Result<(), MenuError> {
        let train_no: usize = self.console.prompt_parse("Enter Train Number: ")?;
        let coach = self.console.prompt("Enter Coach/Class Name: ")?;

        let exists = self
            .state
            .train(train_no)
            .map(|t| t.coach(&coach).is_some());
        let seats = match exists {
            Some(false) => self.console.prompt_parse("Enter Number of Seats: ")?,
            _ => 0,
        };
        let price = match exists {
            Some(_) => self.console.prompt_parse("Enter Ticket Price: ")?,
            None => 0,
        };

        let result = admin::upsert_coach(&mut self.state, train_no, &coach, seats, price)
            .map(|()| "Coach/class updated successfully.".to_string());
        self.report(result)
    }

    fn update_seats(&mut self) -> Result<(), MenuError> {
        let train_no: usize = self.console.prompt_parse("Enter Train Number: ")?;
        let coach = self.console.prompt("Enter Coach/Class Name: ")?;
        let seats: usize = self.console.prompt_parse("Enter New Total Seat Count: ")?;

        let result = admin::update_seats(&mut self.state, train_no, &coach, seats)
            .map(|()| "Seats updated successfully.".to_string());
        self.report(result)
    }

    fn update_train_delay(&mut self) -> Result<(), MenuError> {
        let train_name = self
            .console
            .prompt("Enter Train Name to Update Delay Status: ")?;
        let delayed = match self
            .console
            .prompt("Is the train delayed? (1 for Yes, 0 for No): ")?
            .as_str()
        {
            "1" => true,
            "0" => false,
            _ => return Err(MenuError::InvalidInput),
        };

        admin::update_train_delay(&mut self.state, &train_name, delayed);
        self.console
            .print("Train delay status updated successfully.\n")?;
        self.console
            .print(&admin::render_delay_notifications(&self.state.train_delays))?;
        Ok(())
    }

    fn revenue_report(&mut self) -> Result<(), MenuError> {
        let report = admin::revenue_report(&self.state.trains);
        self.console.print(&admin::render_revenue_report(&report))?;
        Ok(())
    }

    fn view_transaction_logs(&mut self) -> Result<(), MenuError> {
        self.console.print(&self.state.transactions.render())?;
        Ok(())
    }
}
