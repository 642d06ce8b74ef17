use super::model::{Dataset, ExamRecord};

// ---------------------------------------------------------------------------
// Subject filter
// ---------------------------------------------------------------------------

/// Return the records whose subject equals `subject` exactly
/// (case-sensitive), in source order.
///
/// A subject outside the catalog is not an error: it matches nothing.
pub fn filter_by_subject<'a>(dataset: &'a Dataset, subject: &str) -> Vec<&'a ExamRecord> {
    dataset
        .records()
        .iter()
        .filter(|rec| rec.subject == subject)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn returns_only_matching_records_in_order() {
        let ds = sample_dataset();
        let math = filter_by_subject(&ds, "Math");
        assert_eq!(math.len(), 2);
        assert!(math.iter().all(|r| r.subject == "Math"));
        assert_eq!(math[0].student_name, "A");
        assert_eq!(math[1].student_name, "B");
    }

    #[test]
    fn catalog_subjects_partition_the_dataset() {
        let ds = sample_dataset();
        let union: Vec<&ExamRecord> = ds
            .subjects()
            .iter()
            .flat_map(|s| filter_by_subject(&ds, s))
            .collect();
        assert_eq!(union.len(), ds.len());
        for rec in ds.records() {
            assert_eq!(union.iter().filter(|r| std::ptr::eq(**r, rec)).count(), 1);
        }
    }

    #[test]
    fn unknown_or_differently_cased_subject_matches_nothing() {
        let ds = sample_dataset();
        assert!(filter_by_subject(&ds, "History").is_empty());
        assert!(filter_by_subject(&ds, "math").is_empty());
        assert!(filter_by_subject(&ds, "").is_empty());
    }
}
