//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use pixops_core::Pix;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values and report mismatches (default)
    #[default]
    Compare,
    /// Compare and also print every checked value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and recorded failures.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record(&mut self, failure: TestError) -> bool {
        eprintln!("Failure in {}_reg: {}", self.test_name, failure);
        self.failures.push(failure);
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!("  [{}] expected = {}, actual = {}", self.index, expected, actual);
        }

        let diff = (expected - actual).abs();
        if diff > delta {
            return self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
        }
        true
    }

    /// Compare two Pix images for exact equality
    ///
    /// Returns `true` if geometry and every sample are identical.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            let geometry = |p: &Pix| (p.width(), p.height(), p.depth().bits(), p.spp());
            return self.record(TestError::PixGeometry {
                index: self.index,
                expected: geometry(pix1),
                actual: geometry(pix2),
            });
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                for band in 0..pix1.spp() {
                    if pix1.get_sample(x, y, band) != pix2.get_sample(x, y, band) {
                        return self.record(TestError::PixMismatch {
                            index: self.index,
                            x,
                            y,
                        });
                    }
                }
            }
        }

        true
    }

    /// Compare two binary data arrays
    ///
    /// Returns `true` if data is identical.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            return self.record(TestError::StringMismatch {
                index: self.index,
                len1: data1.len(),
                len2: data2.len(),
            });
        }
        true
    }

    /// Return the first recorded failure, if any.
    pub fn check(&self) -> TestResult<()> {
        match self.failures.first() {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        let success = self.failures.is_empty();
        if success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }
}
