//! 任务类型解析
//!
//! 解析顺序（先匹配先返回）：
//! 1. 精确类型表
//! 2. 前缀族 `address_`、`blockcount_`、`difficulty_`、`markets_`、`ticker_`，
//!    后缀必须通过对应注册表的校验
//! 3. 都不匹配时返回 [`ClerkError::UnknownJobType`]
//!
//! `address_` 族的货币如果同时是余额货币，则路由到共享的余额处理器。

use std::collections::{BTreeSet, HashMap};

use clerk_core::{ClerkError, ClerkResult, TargetRegistry};
use tracing::trace;

use crate::catalogue;
use crate::registries::{DynamicFamily, Registries};

/// 解析结果：指向一个处理器，而不是处理器本身
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandlerRef {
    /// 精确类型表中的处理器键
    Exact(&'static str),
    /// 某个前缀族的共享处理器，带经过校验的后缀
    Discovered {
        family: DynamicFamily,
        target: String,
    },
    /// 已迁移到共享余额抓取逻辑的地址货币
    BalanceDiscovered { currency: String },
}

impl HandlerRef {
    pub fn target(&self) -> Option<&str> {
        match self {
            HandlerRef::Exact(_) => None,
            HandlerRef::Discovered { target, .. } => Some(target),
            HandlerRef::BalanceDiscovered { currency } => Some(currency),
        }
    }
}

impl std::fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerRef::Exact(key) => write!(f, "{key}"),
            HandlerRef::Discovered { family, target } => write!(f, "{family}/discovered({target})"),
            HandlerRef::BalanceDiscovered { currency } => {
                write!(f, "address/balance_discovered({currency})")
            }
        }
    }
}

pub struct JobTypeResolver {
    exact: HashMap<&'static str, &'static str>,
    registries: Registries,
}

impl JobTypeResolver {
    pub fn new(registries: Registries) -> Self {
        Self::with_exact_table(catalogue::EXACT_JOB_TYPES, registries)
    }

    pub fn with_exact_table(table: &[(&'static str, &'static str)], registries: Registries) -> Self {
        Self {
            exact: table.iter().copied().collect(),
            registries,
        }
    }

    pub fn builtin() -> Self {
        Self::new(Registries::builtin())
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// 解析任务类型，无副作用
    pub fn resolve(&self, job_type: &str) -> ClerkResult<HandlerRef> {
        if let Some(key) = self.exact.get(job_type) {
            trace!("任务类型 {} 命中精确表: {}", job_type, key);
            return Ok(HandlerRef::Exact(*key));
        }

        for family in DynamicFamily::ALL {
            let Some(suffix) = family.strip(job_type) else {
                continue;
            };

            if !self.registries.for_family(family).is_valid(suffix) {
                return Err(ClerkError::invalid_target(family.prefix(), suffix));
            }

            if family == DynamicFamily::Address
                && self.registries.balance_currencies.is_valid(suffix)
            {
                return Ok(HandlerRef::BalanceDiscovered {
                    currency: suffix.to_string(),
                });
            }

            return Ok(HandlerRef::Discovered {
                family,
                target: suffix.to_string(),
            });
        }

        Err(ClerkError::UnknownJobType(job_type.to_string()))
    }

    pub fn exact_types(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.exact.iter().map(|(job_type, key)| (*job_type, *key))
    }

    /// 精确表引用到的全部处理器键（别名去重后）
    pub fn exact_handler_keys(&self) -> BTreeSet<&'static str> {
        self.exact.values().copied().collect()
    }
}

impl Default for JobTypeResolver {
    fn default() -> Self {
        Self::builtin()
    }
}
