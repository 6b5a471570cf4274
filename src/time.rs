// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Gregorian-date <-> MJD conversion helper the merger and the file
//! orchestrator rely on. This is deliberately thin: all the real work is
//! done by `hifitime`.

use hifitime::Epoch;

/// Convert a Gregorian calendar date (UTC, midnight) into a Modified Julian
/// Date.
pub fn date2mjd(year: i32, month: u8, day: u8) -> f64 {
    let epoch = Epoch::from_gregorian_utc(year, month, day, 0, 0, 0, 0);
    epoch.as_mjd_utc_days()
}

/// Convert a Modified Julian Date into a Gregorian calendar date (UTC),
/// discarding any sub-day fraction.
pub fn mjd2date(mjd: f64) -> (i32, u8, u8) {
    let epoch = Epoch::from_mjd_utc(mjd.floor());
    let (year, month, day, _, _, _, _) = epoch.as_gregorian_utc();
    (year, month, day)
}

/// Some timestamps may be read in ever so slightly off from their true
/// values because of float errors. This function checks if a supplied MJD,
/// when represented in hundredths of a day, is really close to a neat
/// value. If so, the value is rounded and returned.
pub(crate) fn round_hundredths_of_a_day(mjd: f64) -> f64 {
    let hundredths = mjd * 100.0;
    if (hundredths.round() - hundredths).abs() < 1e-6 {
        hundredths.round() / 100.0
    } else {
        mjd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date2mjd() {
        assert_eq!(date2mjd(2014, 11, 13), 56974.0);
        assert_eq!(date2mjd(1901, 1, 1), 15385.0);
        assert_eq!(date2mjd(2099, 12, 31), 88068.0);
    }

    #[test]
    fn test_mjd2date() {
        assert_eq!(mjd2date(56974.0), (2014, 11, 13));
        assert_eq!(mjd2date(15385.0), (1901, 1, 1));
        assert_eq!(mjd2date(88068.0), (2099, 12, 31));
    }

    #[test]
    fn test_round_trip() {
        for (y, m, d) in [(2014, 11, 13), (1901, 1, 1), (2099, 12, 31), (2000, 2, 29)] {
            let mjd = date2mjd(y, m, d);
            assert_eq!(mjd2date(mjd), (y, m, d));
        }
    }

    #[test]
    fn test_round_hundredths() {
        assert_eq!(round_hundredths_of_a_day(56974.004999999), 56974.005);
        assert_eq!(round_hundredths_of_a_day(56974.00333), 56974.00333);
    }
}
