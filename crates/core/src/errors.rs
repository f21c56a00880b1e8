use thiserror::Error;

/// 失败分类
///
/// 只有 `Countable` 失败会累加账户的失败计数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// 上游临时故障，不计入失败次数
    Ignorable,
    /// 其他所有失败
    Countable,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Ignorable => "ignorable",
            FailureClass::Countable => "countable",
        }
    }
}

impl std::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务处理器抛出的失败
///
/// 分类在抛出点确定：处理器选择变体，变体决定 [`FailureClass`]。
#[derive(Debug, Error)]
pub enum HandlerFailure {
    /// 交易所前置网络拦截了请求（例如 CDN 返回的拦截页）
    #[error("request blocked by provider edge network: {0}")]
    EdgeNetworkBlock(String),

    /// 交易所返回了反爬虫验证页
    #[error("provider anti-bot interstitial: {0}")]
    AntiBotInterstitial(String),

    /// 区块链浏览器或钱包守护进程不可用
    #[error("upstream ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// 上游API返回了错误
    #[error("{0}")]
    Api(String),

    /// 上游响应无法解析
    #[error("could not parse response: {0}")]
    InvalidResponse(String),

    /// 处理器写入数据时失败
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// 其他未预期的失败
    #[error("{0}")]
    Other(String),
}

impl HandlerFailure {
    pub fn failure_class(&self) -> FailureClass {
        match self {
            HandlerFailure::EdgeNetworkBlock(_)
            | HandlerFailure::AntiBotInterstitial(_)
            | HandlerFailure::LedgerUnavailable(_) => FailureClass::Ignorable,
            _ => FailureClass::Countable,
        }
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

/// 引擎错误类型定义
#[derive(Debug, Error)]
pub enum ClerkError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unknown job type '{0}'")]
    UnknownJobType(String),

    #[error("'{suffix}' is not a valid {prefix} target")]
    InvalidDynamicTarget { prefix: String, suffix: String },

    #[error("任务类型 '{0}' 没有注册处理器")]
    HandlerNotRegistered(String),

    #[error(transparent)]
    Handler(#[from] HandlerFailure),

    #[error("用户未找到: {id}")]
    UserNotFound { id: i64 },

    #[error("失败阈值查询错误: {0}")]
    ThresholdProvider(String),

    #[error("通知发送错误: {0}")]
    Notification(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl ClerkError {
    pub fn invalid_target(prefix: &str, suffix: &str) -> Self {
        Self::InvalidDynamicTarget {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// 失败分类：只有处理器明确标记的上游临时故障可以忽略，
    /// 其余（包括路由错误和数据库错误）一律计数。
    pub fn failure_class(&self) -> FailureClass {
        match self {
            ClerkError::Handler(failure) => failure.failure_class(),
            _ => FailureClass::Countable,
        }
    }
}

/// 统一的Result类型
pub type ClerkResult<T> = std::result::Result<T, ClerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignorable_categories() {
        let ignorable = [
            HandlerFailure::EdgeNetworkBlock("cf-ray 1234".into()),
            HandlerFailure::AntiBotInterstitial("challenge page".into()),
            HandlerFailure::LedgerUnavailable("bitcoind down".into()),
        ];
        for failure in ignorable {
            assert_eq!(failure.failure_class(), FailureClass::Ignorable);
            assert_eq!(
                ClerkError::Handler(failure).failure_class(),
                FailureClass::Ignorable
            );
        }
    }

    #[test]
    fn test_everything_else_is_countable() {
        assert_eq!(
            HandlerFailure::Api("invalid key".into()).failure_class(),
            FailureClass::Countable
        );
        assert_eq!(
            HandlerFailure::other("boom").failure_class(),
            FailureClass::Countable
        );
        assert_eq!(
            ClerkError::UnknownJobType("unknown_widget".into()).failure_class(),
            FailureClass::Countable
        );
        assert_eq!(
            ClerkError::invalid_target("ticker", "btce").failure_class(),
            FailureClass::Countable
        );
    }

    #[test]
    fn test_handler_message_is_preserved() {
        let err = ClerkError::from(HandlerFailure::Api("API key is invalid".into()));
        assert_eq!(err.to_string(), "API key is invalid");
    }
}
