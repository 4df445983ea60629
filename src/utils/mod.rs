// 工具模块 - 可复现的伪随机序列

pub mod random;

pub use random::SeededSequence;
