//! Key matrix scanning.
//!
//! Each row is driven active in turn while every column is read. A column
//! reading active while row `r` is driven means key `(r, c)` is down. The
//! scanner reports at most one key per pass: the last one found in
//! row-major order. There is no multi-key or ghosting resolution.

use crate::keymap::MatrixCell;
use crate::{Error, Result};
use embedded_hal::digital::{InputPin, OutputPin};

/// Electrical level that counts as "active" on a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    /// Whether the active level is logic high.
    pub const fn active_is_high(self) -> bool {
        matches!(self, Polarity::ActiveHigh)
    }

    /// Interpret a raw pin level.
    pub const fn is_active(self, is_high: bool) -> bool {
        is_high == self.active_is_high()
    }
}

/// Rows rest high and are pulled low to select them.
pub const ROW_DRIVE: Polarity = Polarity::ActiveLow;

/// Columns have pull-downs and read high when a key is closed.
pub const COLUMN_SENSE: Polarity = Polarity::ActiveHigh;

/// Row/column GPIO access used by the scanner.
///
/// Implementations apply the polarity; the scanner only speaks in
/// active/inactive terms.
pub trait MatrixPins {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn set_row_active(&mut self, row: usize) -> Result<()>;
    fn set_row_inactive(&mut self, row: usize) -> Result<()>;
    fn read_column(&mut self, col: usize) -> Result<bool>;
}

/// Scan the whole matrix once.
///
/// Every row is back at its inactive level when this returns, including
/// when a read fails part-way.
pub fn scan<P: MatrixPins>(pins: &mut P) -> Result<Option<MatrixCell>> {
    let mut pressed = None;

    for row in 0..pins.rows() {
        let read = pins
            .set_row_active(row)
            .and_then(|()| read_row(pins, row, &mut pressed));
        let restored = pins.set_row_inactive(row);
        read?;
        restored?;
    }

    if let Some(cell) = pressed {
        trace!("Matrix: ({}, {}) down", cell.row, cell.col);
    }
    Ok(pressed)
}

fn read_row<P: MatrixPins>(
    pins: &mut P,
    row: usize,
    pressed: &mut Option<MatrixCell>,
) -> Result<()> {
    for col in 0..pins.columns() {
        if pins.read_column(col)? {
            *pressed = Some(cell_at(row, col)?);
        }
    }
    Ok(())
}

fn cell_at(row: usize, col: usize) -> Result<MatrixCell> {
    let row = u8::try_from(row).map_err(|_| Error::Gpio)?;
    let col = u8::try_from(col).map_err(|_| Error::Gpio)?;
    Ok(MatrixCell::new(row, col))
}

/// [`MatrixPins`] over `embedded-hal` digital pins.
pub struct PinMatrix<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
}

impl<R, C, const ROWS: usize, const COLS: usize> PinMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    /// Take ownership of the pins and park every row at its inactive level.
    pub fn new(rows: [R; ROWS], cols: [C; COLS]) -> Result<Self> {
        let mut matrix = Self { rows, cols };
        for row in 0..ROWS {
            matrix.set_row_inactive(row).map_err(|_| Error::Init)?;
        }
        Ok(matrix)
    }

    fn drive(&mut self, row: usize, active: bool) -> Result<()> {
        let pin = self.rows.get_mut(row).ok_or(Error::Gpio)?;
        let high = active == ROW_DRIVE.active_is_high();
        let res = if high { pin.set_high() } else { pin.set_low() };
        res.map_err(|_| Error::Gpio)
    }
}

impl<R, C, const ROWS: usize, const COLS: usize> MatrixPins for PinMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    fn rows(&self) -> usize {
        ROWS
    }

    fn columns(&self) -> usize {
        COLS
    }

    fn set_row_active(&mut self, row: usize) -> Result<()> {
        self.drive(row, true)
    }

    fn set_row_inactive(&mut self, row: usize) -> Result<()> {
        self.drive(row, false)
    }

    fn read_column(&mut self, col: usize) -> Result<bool> {
        let pin = self.cols.get_mut(col).ok_or(Error::Gpio)?;
        let high = pin.is_high().map_err(|_| Error::Gpio)?;
        Ok(COLUMN_SENSE.is_active(high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockMatrix;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn idle_matrix_reports_nothing() {
        let mut pins = MockMatrix::new();
        assert_eq!(scan(&mut pins).unwrap(), None);
        assert!(pins.all_rows_inactive());
    }

    #[test]
    fn single_key_is_reported() {
        let mut pins = MockMatrix::new();
        pins.press(1, 2);
        assert_eq!(scan(&mut pins).unwrap(), Some(MatrixCell::new(1, 2)));
        assert!(pins.all_rows_inactive());
    }

    #[test]
    fn last_key_in_scan_order_wins() {
        let mut pins = MockMatrix::new();
        pins.press(0, 2);
        pins.press(2, 0);
        pins.press(1, 1);
        assert_eq!(scan(&mut pins).unwrap(), Some(MatrixCell::new(2, 0)));

        let mut pins = MockMatrix::new();
        pins.press(1, 0);
        pins.press(1, 2);
        assert_eq!(scan(&mut pins).unwrap(), Some(MatrixCell::new(1, 2)));
    }

    #[test]
    fn failed_column_read_still_restores_rows() {
        let mut pins = MockMatrix::new();
        pins.fail_column(1);
        assert_eq!(scan(&mut pins), Err(Error::Gpio));
        assert!(pins.all_rows_inactive());
    }

    #[test]
    fn polarity_constants() {
        assert!(!ROW_DRIVE.active_is_high());
        assert!(COLUMN_SENSE.is_active(true));
        assert!(!COLUMN_SENSE.is_active(false));
        assert!(Polarity::ActiveLow.is_active(false));
    }

    // Wiring model for PinMatrix: a closed key connects its column to its
    // row, and the column reads high only while that row is driven low.
    type Levels = Rc<RefCell<[bool; 3]>>;

    struct RowPin {
        index: usize,
        levels: Levels,
    }

    struct ColPin {
        index: usize,
        levels: Levels,
        closed: Rc<RefCell<Vec<(usize, usize)>>>,
    }

    impl embedded_hal::digital::ErrorType for RowPin {
        type Error = Infallible;
    }

    impl OutputPin for RowPin {
        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            self.levels.borrow_mut()[self.index] = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            self.levels.borrow_mut()[self.index] = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for ColPin {
        type Error = Infallible;
    }

    impl InputPin for ColPin {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            let levels = self.levels.borrow();
            Ok(self
                .closed
                .borrow()
                .iter()
                .any(|&(r, c)| c == self.index && !levels[r]))
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    fn wired() -> (PinMatrix<RowPin, ColPin, 3, 3>, Levels, Rc<RefCell<Vec<(usize, usize)>>>) {
        // Rows start low so construction has to raise them.
        let levels: Levels = Rc::new(RefCell::new([false; 3]));
        let closed = Rc::new(RefCell::new(Vec::new()));
        let rows = [0, 1, 2].map(|index| RowPin {
            index,
            levels: levels.clone(),
        });
        let cols = [0, 1, 2].map(|index| ColPin {
            index,
            levels: levels.clone(),
            closed: closed.clone(),
        });
        let matrix = PinMatrix::new(rows, cols).unwrap();
        (matrix, levels, closed)
    }

    #[test]
    fn pin_matrix_parks_rows_high() {
        let (_matrix, levels, _) = wired();
        assert_eq!(*levels.borrow(), [true; 3]);
    }

    #[test]
    fn pin_matrix_scans_with_active_low_rows() {
        let (mut matrix, levels, closed) = wired();
        closed.borrow_mut().push((2, 1));
        assert_eq!(scan(&mut matrix).unwrap(), Some(MatrixCell::new(2, 1)));
        assert_eq!(*levels.borrow(), [true; 3]);

        closed.borrow_mut().clear();
        assert_eq!(scan(&mut matrix).unwrap(), None);
    }

    #[test]
    fn pin_matrix_rejects_out_of_range_lines() {
        let (mut matrix, _, _) = wired();
        assert_eq!(matrix.set_row_active(3), Err(Error::Gpio));
        assert_eq!(matrix.read_column(9), Err(Error::Gpio));
    }
}
