use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH}
};

/// Snowflake ID生成器
///
/// ID结构 (64位):
/// - 高位: 时间戳(毫秒，自定义起始时间)
/// - 5位: 节点ID (支持32个节点)
/// - 12位: 序列号 (每毫秒4096个ID)
pub struct IdGenerator {
    /// 组合的时间戳和序列号 (高48位时间戳 + 低16位序列号)
    ts_and_seq: AtomicU64,
    /// 自定义起始时间 (2024-01-01 00:00:00 UTC)
    epoch: u64,
    /// 节点ID (0-31)
    node_id: u8
}

impl IdGenerator {
    const NODE_ID_BITS: u8 = 5;
    const SEQUENCE_BITS: u8 = 12;
    const MAX_NODE_ID: u8 = (1 << Self::NODE_ID_BITS) - 1; // 31
    const MAX_SEQUENCE: u64 = (1 << Self::SEQUENCE_BITS) - 1; // 4095

    /// 创建新的ID生成器
    ///
    /// # 参数
    /// - `node_id`: 节点ID，范围 0-31
    pub fn new(node_id: u8) -> Self {
        Self {
            epoch: 1704067200000, // 2024-01-01 00:00:00 UTC
            node_id: node_id & Self::MAX_NODE_ID,
            ts_and_seq: AtomicU64::new(0)
        }
    }

    /// 生成下一个ID
    ///
    /// 线程安全，无锁实现
    pub fn next_id(&self) -> u64 {
        loop {
            let now = self.current_millis();
            let current = self.ts_and_seq.load(Ordering::Acquire);
            let last_ts = current >> 16;
            let last_seq = current & 0xFFFF;

            let (new_ts, new_seq) = if now == last_ts {
                // 同一毫秒内，递增序列号
                let seq = last_seq + 1;
                if seq > Self::MAX_SEQUENCE {
                    // 序列号溢出，等待下一毫秒
                    continue;
                }
                (now, seq)
            } else {
                // 新的毫秒，重置序列号
                (now, 0)
            };

            let new_value = (new_ts << 16) | new_seq;

            // 使用CAS确保原子性
            match self.ts_and_seq.compare_exchange(
                current,
                new_value,
                Ordering::SeqCst,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    // 组装ID: [时间戳][5位节点ID][12位序列号]
                    let timestamp = now - self.epoch;
                    return (timestamp << (Self::NODE_ID_BITS + Self::SEQUENCE_BITS))
                        | ((self.node_id as u64) << Self::SEQUENCE_BITS)
                        | new_seq;
                }
                Err(_) => {
                    // CAS失败，其他线程已更新，重试
                    continue;
                }
            }
        }
    }

    /// 从ID中提取时间戳（Unix毫秒）
    pub fn extract_timestamp(&self, id: u64) -> u64 {
        (id >> (Self::NODE_ID_BITS + Self::SEQUENCE_BITS)) + self.epoch
    }

    /// 从ID中提取节点ID
    pub fn extract_node_id(&self, id: u64) -> u8 {
        ((id >> Self::SEQUENCE_BITS) & ((1 << Self::NODE_ID_BITS) - 1) as u64) as u8
    }

    /// 获取当前时间戳(毫秒)
    #[inline]
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let generator = IdGenerator::new(3);
        let mut last = 0;
        for _ in 0..1000 {
            let id = generator.next_id();
            assert!(id > last);
            last = id;
        }
    }

    #[test]
    fn node_id_roundtrip() {
        let generator = IdGenerator::new(7);
        let id = generator.next_id();
        assert_eq!(generator.extract_node_id(id), 7);
    }
}
