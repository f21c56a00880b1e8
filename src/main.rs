use clerk_worker::HandlerSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 没有注册抓取逻辑时启动会失败，集成方在这里注册处理器
    clerk::run(HandlerSet::new()).await
}
