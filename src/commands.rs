/// Help text sent for `/help`. Sent with `parse_mode: HTML`.
pub const HELP_TEXT: &str = "🤖 <b>翻译机器人帮助</b>

<b>📋 可用命令：</b>
/help - 显示此帮助信息
/on - 开启翻译功能
/off - 关闭翻译功能

<b>🔄 翻译规则：</b>
• 中文消息 → 自动翻译成英文
• 英文消息 → 自动翻译成中文

<b>📝 使用方法：</b>
1. 发送 /on 开启翻译
2. 直接发送文字即可自动翻译
3. 发送 /off 关闭翻译";

pub const ENABLED_TEXT: &str = "✅ 翻译功能已开启！\n\n发送任意文字即可自动翻译。";

pub const DISABLED_TEXT: &str = "❌ 翻译功能已关闭。\n\n发送 /on 可重新开启。";

/// Bot control commands. Matching is exact and case-sensitive, with no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    On,
    Off,
}

impl Command {
    /// `text` must already be trimmed; anything else is ordinary content
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/help" => Some(Command::Help),
            "/on" => Some(Command::On),
            "/off" => Some(Command::Off),
            _ => None,
        }
    }

    /// Toggle value the command writes, if any
    pub fn toggle_value(self) -> Option<bool> {
        match self {
            Command::Help => None,
            Command::On => Some(true),
            Command::Off => Some(false),
        }
    }

    pub fn reply(self) -> &'static str {
        match self {
            Command::Help => HELP_TEXT,
            Command::On => ENABLED_TEXT,
            Command::Off => DISABLED_TEXT,
        }
    }
}
