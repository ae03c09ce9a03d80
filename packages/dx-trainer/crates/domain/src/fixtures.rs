use dx_template::{
    DemographicsModel, DiagnosticTest, DiseaseTemplate, GaussianParams, SymptomModel,
    TestCharacteristics,
};
use std::collections::BTreeMap;

fn map<V: Clone>(pairs: &[(&str, V)]) -> BTreeMap<String, V> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A fully specified template with a binary `WBC_Count` test and a
/// multi-finding `CT_Scan` test.
pub fn template(name: &str, prior: f64) -> DiseaseTemplate {
    DiseaseTemplate {
        name: name.to_string(),
        prior,
        demographics: DemographicsModel {
            age: GaussianParams::new(40.0, 10.0),
            sex_distribution: map(&[("female", 0.5), ("male", 0.5)]),
            race_distribution: map(&[("white", 1.0)]),
        },
        symptoms: map(&[
            ("fever", SymptomModel::new(0.8)),
            ("nausea", SymptomModel::new(0.3)),
        ]),
        vitals: map(&[("pulse", GaussianParams::new(90.0, 10.0))]),
        diagnostic_tests: map(&[
            (
                "WBC_Count",
                DiagnosticTest::Binary(TestCharacteristics::new(0.9, 0.95)),
            ),
            (
                "CT_Scan",
                DiagnosticTest::MultiFinding(map(&[
                    ("inflammation", TestCharacteristics::new(0.8, 0.9)),
                    ("perforation", TestCharacteristics::new(0.2, 0.99)),
                ])),
            ),
        ]),
    }
}
