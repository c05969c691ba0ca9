//! Ticket checkout: seats, then concessions, then confirmation.

pub mod concessions;
pub mod seats;

pub use concessions::{Concessions, Product, Size};
pub use seats::{parse_seat_label, seat_label, SeatMap, SeatOutOfRange, SeatState, SeatToggle};

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Order, Screening};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    SeatSelection,
    Concessions,
    Confirm,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Please select at least one seat.")]
    NoTickets,

    #[error("Only {remaining} tickets left for this screening.")]
    NotEnoughTickets { remaining: u32 },

    #[error(transparent)]
    Seat(#[from] SeatOutOfRange),

    #[error("could not place the order: {0}")]
    Api(#[from] ApiError),
}

/// One customer's purchase in progress for a single screening.
#[derive(Debug, Clone)]
pub struct Checkout {
    screening: Screening,
    seats: SeatMap,
    concessions: Concessions,
    stage: CheckoutStage,
}

impl Checkout {
    pub fn new(screening: Screening) -> Self {
        let seats = SeatMap::new(&screening.seat_grid());
        Self {
            screening,
            seats,
            concessions: Concessions::new(),
            stage: CheckoutStage::SeatSelection,
        }
    }

    pub fn screening(&self) -> &Screening {
        &self.screening
    }

    pub fn seats(&self) -> &SeatMap {
        &self.seats
    }

    pub fn concessions(&self) -> &Concessions {
        &self.concessions
    }

    pub fn concessions_mut(&mut self) -> &mut Concessions {
        &mut self.concessions
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn tickets(&self) -> u32 {
        self.seats.selected_count()
    }

    pub fn toggle_seat(&mut self, row: usize, column: usize) -> Result<SeatToggle, CheckoutError> {
        Ok(self.seats.toggle(row, column)?)
    }

    /// Moves one stage forward. Leaving seat selection needs at least one seat.
    pub fn advance(&mut self) -> Result<CheckoutStage, CheckoutError> {
        self.stage = match self.stage {
            CheckoutStage::SeatSelection => {
                self.ensure_tickets()?;
                CheckoutStage::Concessions
            }
            CheckoutStage::Concessions | CheckoutStage::Confirm => CheckoutStage::Confirm,
        };
        Ok(self.stage)
    }

    pub fn back(&mut self) -> CheckoutStage {
        self.stage = match self.stage {
            CheckoutStage::Confirm => CheckoutStage::Concessions,
            CheckoutStage::Concessions | CheckoutStage::SeatSelection => CheckoutStage::SeatSelection,
        };
        self.stage
    }

    fn ensure_tickets(&self) -> Result<(), CheckoutError> {
        let tickets = self.tickets();
        if tickets == 0 {
            return Err(CheckoutError::NoTickets);
        }
        if tickets > self.screening.tickets_remaining {
            return Err(CheckoutError::NotEnoughTickets {
                remaining: self.screening.tickets_remaining,
            });
        }
        Ok(())
    }

    /// The order this checkout would place for `account_id`.
    pub fn order_for(&self, account_id: i64) -> Result<Order, CheckoutError> {
        self.ensure_tickets()?;
        Ok(Order {
            id: 0,
            screening_id: self.screening.id,
            account_id,
            tickets: self.tickets(),
            popcorn: self.concessions.counts(Product::Popcorn),
            soda: self.concessions.counts(Product::Soda),
            seats: self.seats.selected_labels(),
        })
    }

    /// Posts the order. Nothing is sent when no seat is selected.
    pub async fn confirm(&self, client: &ApiClient, account_id: i64) -> Result<Order, CheckoutError> {
        let order = match self.order_for(account_id) {
            Ok(order) => order,
            Err(e) => {
                warn!("Checkout for screening {} rejected: {}", self.screening.id, e);
                return Err(e);
            }
        };

        let placed = client.create_order(&order).await?;
        info!(
            "Order {} placed: screening={}, tickets={}, seats={:?}",
            placed.id, placed.screening_id, placed.tickets, order.seats
        );
        Ok(placed)
    }
}
