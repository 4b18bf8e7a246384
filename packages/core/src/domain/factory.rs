//! Domain factories for creating domain entities and value objects.

use super::MessageId;

/// Factory for generating MessageId instances.
///
/// Ids are derived from the send time in milliseconds. When two messages land
/// in the same millisecond, or the clock moves backwards, the factory bumps
/// past the last issued id so ids stay unique and strictly increasing for the
/// lifetime of the session.
#[derive(Debug, Default, Clone)]
pub struct MessageIdFactory {
    last_issued: u64,
}

impl MessageIdFactory {
    /// Create a factory whose first id is greater than `last_issued`.
    pub fn starting_after(last_issued: u64) -> Self {
        Self { last_issued }
    }

    /// Generate the id for a message sent at `timestamp_millis`.
    pub fn generate(&mut self, timestamp_millis: i64) -> MessageId {
        let candidate = u64::try_from(timestamp_millis).unwrap_or(0);
        let next = candidate.max(self.last_issued.saturating_add(1));
        self.last_issued = next;
        MessageId::new(next)
    }

    /// The most recently issued id (or the starting point).
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id_factory_uses_timestamp() {
        // テスト項目: 時刻が前回 ID より大きい場合はそのまま ID になる
        // given (前提条件):
        let mut factory = MessageIdFactory::starting_after(3);

        // when (操作):
        let id = factory.generate(1_700_000_000_000);

        // then (期待する結果):
        assert_eq!(id.value(), 1_700_000_000_000);
    }

    #[test]
    fn test_message_id_factory_generate_uniqueness() {
        // テスト項目: 同じミリ秒に生成しても毎回異なる ID になる
        // given (前提条件):
        let mut factory = MessageIdFactory::default();

        // when (操作):
        let id1 = factory.generate(1000);
        let id2 = factory.generate(1000);
        let id3 = factory.generate(1000);

        // then (期待する結果):
        assert_eq!(id1.value(), 1000);
        assert_eq!(id2.value(), 1001);
        assert_eq!(id3.value(), 1002);
    }

    #[test]
    fn test_message_id_factory_clock_going_backwards() {
        // テスト項目: 時計が巻き戻っても ID は単調増加する
        let mut factory = MessageIdFactory::default();

        let id1 = factory.generate(5000);
        let id2 = factory.generate(4000);

        assert!(id2 > id1);
    }

    #[test]
    fn test_message_id_factory_starting_after_seed() {
        // テスト項目: 初期メッセージの ID と衝突しない
        let mut factory = MessageIdFactory::starting_after(3);

        let id = factory.generate(-1);

        assert_eq!(id.value(), 4);
        assert_eq!(factory.last_issued(), 4);
    }
}
