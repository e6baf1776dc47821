use serde::Serialize;

/// 一次頂層積分呼叫的結果：積分估計值與實際呼叫被積函數的次數。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntegrationResult {
    value: f64,
    evaluations: usize
}

impl IntegrationResult {
    pub fn new(value: f64, evaluations: usize) -> IntegrationResult {
        IntegrationResult { value, evaluations }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn absolute_error(&self, reference: f64) -> f64 {
        (self.value - reference).abs()
    }
}

impl From<IntegrationResult> for (f64, usize) {
    fn from(result: IntegrationResult) -> (f64, usize) {
        (result.value, result.evaluations)
    }
}
