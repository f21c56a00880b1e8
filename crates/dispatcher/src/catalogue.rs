//! 内置静态数据：精确任务类型表、账户类型和各注册表的键。
//!
//! 这里只有数据，查找逻辑在 [`crate::resolver`]、[`crate::standard_jobs`]
//! 和 [`crate::account_data`] 中。

/// 精确任务类型 → 处理器键
///
/// 任务类型与处理器键不一定同名，例如 `securities_crypto-trade` 使用
/// `securities_cryptotrade` 处理器。
pub const EXACT_JOB_TYPES: &[(&str, &str)] = &[
    // ticker jobs
    ("ticker", "ticker"),
    ("reported_currencies", "reported_currencies"),
    // account jobs
    ("generic", "generic"),
    ("bit2c", "bit2c"),
    ("btce", "btce"),
    ("vircurex", "vircurex"),
    ("poolx", "poolx"),
    ("wemineltc", "wemineltc"),
    ("wemineftc", "wemineftc"),
    ("givemecoins", "givemecoins"),
    ("slush", "slush"),
    ("cryptostocks", "cryptostocks"),
    ("securities_cryptostocks", "securities_cryptostocks"),
    ("btcguild", "btcguild"),
    ("havelock", "havelock"),
    ("securities_havelock", "securities_havelock"),
    ("bitminter", "bitminter"),
    ("liteguardian", "liteguardian"),
    ("khore", "khore"),
    ("cexio", "cexio"),
    ("ghashio", "ghashio"),
    ("crypto-trade", "crypto-trade"),
    ("securities_crypto-trade", "securities_cryptotrade"),
    ("bitstamp", "bitstamp"),
    ("796", "796"),
    ("securities_796", "securities_796"),
    ("kattare", "kattare"),
    ("litepooleu", "litepooleu"),
    ("coinhuntr", "coinhuntr"),
    ("eligius", "eligius"),
    ("litecoinpool", "litecoinpool"),
    ("elitistjerks", "elitistjerks"),
    ("hashfaster_ltc", "hashfaster_ltc"),
    ("hashfaster_ftc", "hashfaster_ftc"),
    ("hashfaster_doge", "hashfaster_doge"),
    ("triplemining", "triplemining"),
    ("ozcoin_ltc", "ozcoin_ltc"),
    ("ozcoin_btc", "ozcoin_btc"),
    ("scryptpools", "scryptpools"),
    ("justcoin", "justcoin"),
    ("multipool", "multipool"),
    ("ypool", "ypool"),
    ("coinbase", "coinbase"),
    ("litecoininvest", "litecoininvest"),
    ("miningpoolco", "miningpoolco"),
    ("vaultofsatoshi", "vaultofsatoshi"),
    ("50btc", "50btc"),
    ("ecoining_ppc", "ecoining_ppc"),
    ("teamdoge", "teamdoge"),
    ("dedicatedpool_doge", "dedicatedpool_doge"),
    ("nut2pools_ftc", "nut2pools_ftc"),
    ("cryptsy", "cryptsy"),
    ("cryptopools_dgc", "cryptopools_dgc"),
    ("d2_wdc", "d2_wdc"),
    ("kraken", "kraken"),
    ("cryptotroll_doge", "cryptotroll_doge"),
    ("bitmarket_pl", "bitmarket_pl"),
    ("poloniex", "poloniex"),
    ("mupool", "mupool"),
    ("anxpro", "anxpro"),
    ("bittrex", "bittrex"),
    ("nicehash", "nicehash"),
    ("westhash", "westhash"),
    ("eobot", "eobot"),
    ("hashtocoins", "hashtocoins"),
    ("btclevels", "btclevels"),
    ("bitnz", "bitnz"),
    // individual securities jobs
    ("individual_cryptostocks", "individual_cryptostocks"),
    ("individual_havelock", "individual_havelock"),
    ("individual_crypto-trade", "individual_crypto-trade"),
    ("individual_796", "individual_796"),
    ("individual_litecoininvest", "individual_litecoininvest"),
    // summary jobs
    ("sum", "sum"),
    ("securities_count", "securities_count"),
    // notification jobs
    ("notification", "notification"),
    // system jobs
    ("securities_update", "securities_update"),
    ("version_check", "version_check"),
    ("vote_coins", "vote_coins"),
    // transaction jobs
    ("transaction_creator", "transaction_creator"),
    ("transactions", "transactions"),
    // cleanup jobs, admin jobs etc
    ("outstanding", "outstanding"),
    ("expiring", "expiring"),
    ("expire", "expire"),
    ("cleanup", "cleanup"),
    ("disable_warning", "disable_warning"),
    ("disable", "disable"),
    ("delete_user", "delete_user"),
];

/// 账户类型：任务类型 → 交易所/矿池显示名称
pub const ACCOUNT_TYPES: &[(&str, &str)] = &[
    ("generic", "Generic API"),
    ("bit2c", "Bit2c"),
    ("btce", "BTC-e"),
    ("vircurex", "Vircurex"),
    ("poolx", "Pool-x.eu"),
    ("wemineltc", "WeMineLTC"),
    ("wemineftc", "WeMineFTC"),
    ("givemecoins", "Give Me Coins"),
    ("slush", "Slush's pool"),
    ("cryptostocks", "Cryptostocks"),
    ("btcguild", "BTC Guild"),
    ("havelock", "Havelock Investments"),
    ("bitminter", "BitMinter"),
    ("liteguardian", "LiteGuardian"),
    ("khore", "nvc.khore.org"),
    ("cexio", "CEX.io"),
    ("ghashio", "GHash.io"),
    ("crypto-trade", "Crypto-Trade"),
    ("bitstamp", "Bitstamp"),
    ("796", "796 Xchange"),
    ("kattare", "ltc.kattare.com"),
    ("litepooleu", "Litepool"),
    ("coinhuntr", "CoinHuntr"),
    ("eligius", "Eligius"),
    ("litecoinpool", "litecoinpool.org"),
    ("elitistjerks", "Elitist Jerks"),
    ("hashfaster_ltc", "HashFaster LTC"),
    ("hashfaster_ftc", "HashFaster FTC"),
    ("hashfaster_doge", "HashFaster DOGE"),
    ("triplemining", "TripleMining"),
    ("ozcoin_ltc", "Ozcoin LTC"),
    ("ozcoin_btc", "Ozcoin BTC"),
    ("scryptpools", "scryptpools.com"),
    ("justcoin", "Justcoin"),
    ("multipool", "Multipool"),
    ("ypool", "ypool.net"),
    ("coinbase", "Coinbase"),
    ("litecoininvest", "Litecoininvest"),
    ("miningpoolco", "MiningPool.co"),
    ("vaultofsatoshi", "Vault of Satoshi"),
    ("50btc", "50BTC"),
    ("ecoining_ppc", "Ecoining Peercoin"),
    ("teamdoge", "TeamDoge"),
    ("dedicatedpool_doge", "dedicatedpool.com DOGE"),
    ("nut2pools_ftc", "Nut2Pools FTC"),
    ("cryptsy", "Cryptsy"),
    ("cryptopools_dgc", "CryptoPools DGC"),
    ("d2_wdc", "d2 WDC"),
    ("kraken", "Kraken"),
    ("cryptotroll_doge", "Cryptotroll DOGE"),
    ("bitmarket_pl", "BitMarket.pl"),
    ("poloniex", "Poloniex"),
    ("mupool", "MuPool"),
    ("anxpro", "ANXPRO"),
    ("bittrex", "Bittrex"),
    ("nicehash", "NiceHash"),
    ("westhash", "WestHash"),
    ("eobot", "Eobot"),
    ("hashtocoins", "Hash-to-coins"),
    ("btclevels", "BTClevels"),
    ("bitnz", "BitNZ"),
];

/// 单个证券账户：任务类型 → 显示名称
pub const INDIVIDUAL_SECURITY_TYPES: &[(&str, &str)] = &[
    ("individual_cryptostocks", "Cryptostocks"),
    ("individual_havelock", "Havelock Investments"),
    ("individual_crypto-trade", "Crypto-Trade"),
    ("individual_796", "796 Xchange"),
    ("individual_litecoininvest", "Litecoininvest"),
];

pub const ADDRESS_CURRENCIES: &[&str] = &[
    "btc", "ltc", "nmc", "ppc", "ftc", "xpm", "nvc", "trc", "dog", "mec", "xrp", "dgc", "wdc",
    "ixc", "vtc", "net", "hbn", "bc1", "drk", "vrc", "nxt", "rdd", "via", "nsr",
];

/// 已迁移到共享余额抓取逻辑的地址货币
pub const BALANCE_CURRENCIES: &[&str] = &[
    "btc", "ltc", "nmc", "ppc", "ftc", "dog", "vtc", "drk", "nxt", "rdd", "via", "nsr",
];

pub const BLOCK_CURRENCIES: &[&str] = &[
    "btc", "ltc", "nmc", "ppc", "ftc", "xpm", "nvc", "trc", "dog", "mec", "dgc", "wdc", "ixc",
    "vtc", "net", "hbn", "drk",
];

pub const DIFFICULTY_CURRENCIES: &[&str] = &[
    "btc", "ltc", "nmc", "ppc", "ftc", "xpm", "nvc", "trc", "dog", "mec", "dgc", "wdc", "ixc",
    "vtc", "net", "hbn", "drk",
];

pub const EXCHANGES: &[&str] = &[
    "anxpro",
    "bit2c",
    "bitcurex",
    "bitmarket_pl",
    "bitnz",
    "bitstamp",
    "bittrex",
    "btcchina",
    "bter",
    "cexio",
    "coinbase",
    "coins-e",
    "crypto-trade",
    "cryptsy",
    "justcoin",
    "kraken",
    "poloniex",
    "themoneyconverter",
    "vaultofsatoshi",
    "vircurex",
];

/// 账户类型对应的失败状态表名
pub fn account_table(job_type: &str) -> String {
    format!("accounts_{}", job_type.replace('-', ""))
}
