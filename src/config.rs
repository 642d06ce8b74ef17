use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Column mapping: which source columns carry the exam fields
// ---------------------------------------------------------------------------

/// Names of the source columns that feed the chart. Every other column is
/// carried through to the table untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub student: String,
    pub subject: String,
    pub semester: String,
    pub score: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            student: "Student_Name".to_string(),
            subject: "Subject".to_string(),
            semester: "Semester".to_string(),
            score: "Score".to_string(),
        }
    }
}

impl ColumnMapping {
    /// The required columns in a fixed order, used for header validation.
    pub fn required(&self) -> [&str; 4] {
        [&self.student, &self.subject, &self.semester, &self.score]
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Exam Results and Trends Dashboard".to_string(),
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

pub const DEFAULT_DATA_PATH: &str = "exam_data.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnMapping,
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            columns: ColumnMapping::default(),
            window: WindowConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Build the config from process arguments (program name excluded).
    /// The only accepted argument is an optional data file path.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = path.into();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_exam_data_csv() {
        let config = DashboardConfig::from_args(Vec::<String>::new());
        assert_eq!(config.data_path, PathBuf::from("exam_data.csv"));
        assert_eq!(
            config.columns.required(),
            ["Student_Name", "Subject", "Semester", "Score"]
        );
    }

    #[test]
    fn first_argument_overrides_data_path() {
        let config = DashboardConfig::from_args(["scores/spring.csv", "ignored"]);
        assert_eq!(config.data_path, PathBuf::from("scores/spring.csv"));
    }
}
