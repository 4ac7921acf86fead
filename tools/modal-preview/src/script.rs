//! 输入脚本
//!
//! 逗号分隔的步骤，例如 `open:1,next,prev,escape`。

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};
use videos_modal::{Key, ModalInput};

/// 单个步骤
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// 交给控制器的输入
    Input(ModalInput),
    /// 按相同链接重新注册
    Reset,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(index) = s.strip_prefix("open:") {
            let index = index
                .trim()
                .parse()
                .with_context(|| format!("无效的链接索引: {index}"))?;
            return Ok(Step::Input(ModalInput::link(index)));
        }

        let input = match s {
            "prev" => ModalInput::PrevClicked,
            "next" => ModalInput::NextClicked,
            "close" | "icon" => ModalInput::CloseIconClicked,
            "background" => ModalInput::BackgroundClicked,
            "escape" => ModalInput::KeyDown(Key::Escape),
            "left" => ModalInput::KeyDown(Key::ArrowLeft),
            "right" => ModalInput::KeyDown(Key::ArrowRight),
            "reset" => return Ok(Step::Reset),
            other => bail!("未知步骤: {other}"),
        };
        Ok(Step::Input(input))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Input(ModalInput::LinkClicked { index }) => write!(f, "open:{index}"),
            Step::Input(input) => write!(f, "{input:?}"),
            Step::Reset => f.write_str("reset"),
        }
    }
}

/// 解析整段脚本，空脚本返回空列表
pub fn parse_script(script: &str) -> anyhow::Result<Vec<Step>> {
    script
        .split(',')
        .filter(|step| !step.trim().is_empty())
        .map(str::parse::<Step>)
        .collect()
}
