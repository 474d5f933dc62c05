// Catalog: trains, their coaches and per-coach seat pools

use serde::Deserialize;

// Seat count of every seeded coach
pub const MAX_SEATS: usize = 10;

// Upper bound for any single coach's seat pool
pub const MAX_COACH_SEATS: usize = 1000;

// A coach is a class of travel with its own seat pool and price.
// `seats[i]` is true when seat i + 1 is occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub name: String,
    pub seats: Vec<bool>,
    pub price: u32,
}

impl Coach {
    pub fn new(name: &str, seat_count: usize, price: u32) -> Self {
        Self {
            name: name.to_string(),
            seats: vec![false; seat_count],
            price,
        }
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn free_seats(&self) -> usize {
        self.seats.iter().filter(|occupied| !**occupied).count()
    }

    pub fn occupied_seats(&self) -> usize {
        self.seat_count() - self.free_seats()
    }

    pub fn revenue(&self) -> u64 {
        self.occupied_seats() as u64 * self.price as u64
    }

    // Lowest-index free seat, 1-based
    pub fn first_free_seat(&self) -> Option<usize> {
        self.seats.iter().position(|occupied| !occupied).map(|i| i + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub coaches: Vec<Coach>,
}

impl Train {
    pub fn new(name: &str, source: &str, destination: &str, coaches: Vec<Coach>) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            destination: destination.to_string(),
            coaches,
        }
    }

    pub fn coach(&self, name: &str) -> Option<&Coach> {
        self.coaches.iter().find(|c| c.name == name)
    }

    pub fn coach_mut(&mut self, name: &str) -> Option<&mut Coach> {
        self.coaches.iter_mut().find(|c| c.name == name)
    }
}

// Deserializable description of a train, used to override the seed catalog from config
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TrainSpec {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub coaches: Vec<CoachSpec>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CoachSpec {
    pub name: String,
    pub seats: usize,
    pub price: u32,
}

impl From<&TrainSpec> for Train {
    fn from(spec: &TrainSpec) -> Self {
        Train::new(
            &spec.name,
            &spec.source,
            &spec.destination,
            spec.coaches
                .iter()
                .map(|c| Coach::new(&c.name, c.seats, c.price))
                .collect(),
        )
    }
}

pub fn default_trains(seats_per_coach: usize) -> Vec<Train> {
    let seed = [
        ("Green Express", "Karachi", "Lahore", 2000, 1000),
        ("Blue Line", "Islamabad", "Karachi", 2200, 1200),
        ("Red Arrow", "Quetta", "Peshawar", 2500, 1500),
    ];

    seed.iter()
        .map(|(name, source, destination, business, economy)| {
            Train::new(
                name,
                source,
                destination,
                vec![
                    Coach::new("Business", seats_per_coach, *business),
                    Coach::new("Economy", seats_per_coach, *economy),
                ],
            )
        })
        .collect()
}

pub fn render_trains(trains: &[Train]) -> String {
    let mut out = String::from("\nAvailable Trains:\n");
    out.push_str(&format!(
        "{:<10}{:<20}{:<15}{:<20}Classes (Seats)\n",
        "Train No.", "Train Name", "Source", "Destination"
    ));
    out.push_str(&"-".repeat(63));
    out.push('\n');

    for (i, train) in trains.iter().enumerate() {
        let classes: Vec<String> = train
            .coaches
            .iter()
            .map(|c| format!("{} ({} seats)", c.name, c.free_seats()))
            .collect();
        out.push_str(&format!(
            "{:<10}{:<20}{:<15}{:<20}{}\n",
            i + 1,
            train.name,
            train.source,
            train.destination,
            classes.join(", ")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let trains = default_trains(MAX_SEATS);
        assert_eq!(trains.len(), 3);

        for train in &trains {
            assert_eq!(train.coaches.len(), 2);
            for coach in &train.coaches {
                assert_eq!(coach.seat_count(), MAX_SEATS);
                assert_eq!(coach.free_seats(), MAX_SEATS);
                assert!(coach.price > 0);
            }
        }

        let green = &trains[0];
        assert_eq!(green.name, "Green Express");
        assert_eq!(green.coach("Economy").map(|c| c.price), Some(1000));
        assert_eq!(green.coach("Business").map(|c| c.price), Some(2000));
        assert!(green.coach("First").is_none());
    }

    #[test]
    fn test_first_free_seat_skips_occupied() {
        let mut coach = Coach::new("Economy", 4, 500);
        assert_eq!(coach.first_free_seat(), Some(1));

        coach.seats[0] = true;
        coach.seats[2] = true;
        assert_eq!(coach.first_free_seat(), Some(2));
        assert_eq!(coach.occupied_seats(), 2);
        assert_eq!(coach.revenue(), 1000);

        coach.seats = vec![true; 4];
        assert_eq!(coach.first_free_seat(), None);
    }

    #[test]
    fn test_render_trains_lists_free_seats() {
        let mut trains = default_trains(MAX_SEATS);
        trains[1].coaches[1].seats[0] = true;

        let table = render_trains(&trains);
        assert!(table.contains("Train No."));
        assert!(table.contains(
            "1         Green Express       Karachi        Lahore              Business (10 seats), Economy (10 seats)"
        ));
        assert!(table.contains("Economy (9 seats)"));
    }

    #[test]
    fn test_train_from_spec() {
        let spec = TrainSpec {
            name: "Night Owl".to_string(),
            source: "Multan".to_string(),
            destination: "Sukkur".to_string(),
            coaches: vec![CoachSpec {
                name: "Sleeper".to_string(),
                seats: 6,
                price: 1800,
            }],
        };

        let train = Train::from(&spec);
        assert_eq!(train.coach("Sleeper").map(Coach::free_seats), Some(6));
    }
}
