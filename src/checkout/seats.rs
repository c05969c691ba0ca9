use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Free,
    /// Sold before this checkout started.
    Booked,
    /// Picked in this checkout.
    Selected,
}

/// What a click on a seat did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatToggle {
    Selected,
    Released,
    /// The seat was already booked; nothing changed.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("seat ({row}, {column}) is outside the room")]
pub struct SeatOutOfRange {
    pub row: usize,
    pub column: usize,
}

/// Seat grid of one screening with a running count of selected seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    seats: Vec<Vec<SeatState>>,
    selected: u32,
}

impl SeatMap {
    /// `booked[row][column]` marks seats that are already sold.
    pub fn new(booked: &[Vec<bool>]) -> Self {
        let seats = booked
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&taken| if taken { SeatState::Booked } else { SeatState::Free })
                    .collect()
            })
            .collect();
        Self { seats, selected: 0 }
    }

    pub fn seat(&self, row: usize, column: usize) -> Option<SeatState> {
        self.seats.get(row)?.get(column).copied()
    }

    pub fn toggle(&mut self, row: usize, column: usize) -> Result<SeatToggle, SeatOutOfRange> {
        let seat = self
            .seats
            .get_mut(row)
            .and_then(|r| r.get_mut(column))
            .ok_or(SeatOutOfRange { row, column })?;

        let outcome = match *seat {
            SeatState::Free => {
                *seat = SeatState::Selected;
                self.selected += 1;
                SeatToggle::Selected
            }
            SeatState::Selected => {
                *seat = SeatState::Free;
                self.selected = self.selected.saturating_sub(1);
                SeatToggle::Released
            }
            SeatState::Booked => SeatToggle::Unavailable,
        };
        Ok(outcome)
    }

    /// Number of seats picked in this checkout, i.e. the ticket count.
    pub fn selected_count(&self) -> u32 {
        self.selected
    }

    /// Coordinates of the picked seats, row-major.
    pub fn selected(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.seats.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, state)| **state == SeatState::Selected)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn selected_labels(&self) -> Vec<String> {
        self.selected().map(|(r, c)| seat_label(r, c)).collect()
    }
}

/// `A1` for the first seat of the first row.
pub fn seat_label(row: usize, column: usize) -> String {
    format!("{}{}", row_letters(row), column + 1)
}

/// Inverse of [`seat_label`]: `B4` is `(1, 3)`. Case-insensitive.
pub fn parse_seat_label(label: &str) -> Option<(usize, usize)> {
    let label = label.trim();
    let split = label.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = label.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut row = 0usize;
    for c in letters.chars() {
        let value = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        row = row.checked_mul(26)?.checked_add(value)?;
    }
    let column: usize = digits.parse().ok()?;
    if column == 0 {
        return None;
    }
    Some((row - 1, column - 1))
}

/// A..Z, then AA, AB, ...
fn row_letters(row: usize) -> String {
    let mut letters = String::new();
    let mut n = row + 1;
    while n > 0 {
        n -= 1;
        letters.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters
}

// Схема зала для терминала: '.' свободно, 'x' продано, 'o' выбрано.
impl fmt::Display for SeatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.seats.iter().enumerate() {
            write!(f, "{:>3} ", row_letters(r))?;
            for state in row {
                let glyph = match state {
                    SeatState::Free => '.',
                    SeatState::Booked => 'x',
                    SeatState::Selected => 'o',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_rows_with_letters() {
        assert_eq!(seat_label(0, 0), "A1");
        assert_eq!(seat_label(1, 3), "B4");
        assert_eq!(seat_label(25, 0), "Z1");
        assert_eq!(seat_label(26, 1), "AA2");
    }

    #[test]
    fn parses_labels_back() {
        assert_eq!(parse_seat_label("A1"), Some((0, 0)));
        assert_eq!(parse_seat_label("b4"), Some((1, 3)));
        assert_eq!(parse_seat_label("AA2"), Some((26, 1)));
        assert_eq!(parse_seat_label("A0"), None);
        assert_eq!(parse_seat_label("4B"), None);
        assert_eq!(parse_seat_label("B"), None);
    }

    #[test]
    fn toggling_twice_restores_the_seat() {
        let mut map = SeatMap::new(&[vec![false, false]]);
        assert_eq!(map.toggle(0, 1), Ok(SeatToggle::Selected));
        assert_eq!(map.selected_count(), 1);
        assert_eq!(map.toggle(0, 1), Ok(SeatToggle::Released));
        assert_eq!(map.selected_count(), 0);
        assert_eq!(map.seat(0, 1), Some(SeatState::Free));
    }

    #[test]
    fn booked_seats_cannot_be_taken() {
        let mut map = SeatMap::new(&[vec![false, false], vec![false, true]]);
        assert_eq!(map.toggle(0, 0), Ok(SeatToggle::Selected));
        assert_eq!(map.toggle(1, 1), Ok(SeatToggle::Unavailable));
        assert_eq!(map.selected_count(), 1);
        assert_eq!(map.selected_labels(), vec!["A1".to_string()]);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut map = SeatMap::new(&[vec![false]]);
        assert_eq!(map.toggle(0, 3), Err(SeatOutOfRange { row: 0, column: 3 }));
        assert_eq!(map.toggle(2, 0), Err(SeatOutOfRange { row: 2, column: 0 }));
        assert_eq!(map.selected_count(), 0);
    }

    #[test]
    fn renders_room_layout() {
        let mut map = SeatMap::new(&[vec![false, true], vec![false, false]]);
        map.toggle(1, 0).unwrap();
        assert_eq!(map.to_string(), "  A .x\n  B o.\n");
    }
}
