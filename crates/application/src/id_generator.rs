use domain::IdGenerator;
use rand::distr::Alphanumeric;
use rand::Rng;

/// 默认标识长度
pub const DEFAULT_ID_LENGTH: usize = 8;

/// 生成小写字母数字组成的随机不透明标识
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(Alphanumeric)
            .take(self.length)
            .map(|byte| char::from(byte).to_ascii_lowercase())
            .collect()
    }
}
