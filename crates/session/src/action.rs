/// # Summary
/// 用户可发起的抽象动作，与具体的界面框架无关。
///
/// # Invariants
/// - 每个动作只由一个处理器处理，处理后统一重新渲染。
/// - 除 `Save` 成功外，任何动作都会清空保存状态文案。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    // 上一页
    Previous,
    // 下一页
    Next,
    // 跳转到 1 起始的页码，输入框为空时为 None
    JumpTo(Option<i64>),
    // 图表点击上报的时间坐标原文
    ClickCandle(String),
    // 将完整数据集写入进度文件
    Save,
}

impl SessionAction {
    /// 用于日志的动作名称
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::Previous => "previous",
            SessionAction::Next => "next",
            SessionAction::JumpTo(_) => "jump",
            SessionAction::ClickCandle(_) => "click",
            SessionAction::Save => "save",
        }
    }
}
