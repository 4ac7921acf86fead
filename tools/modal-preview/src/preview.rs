//! # Preview 模块
//!
//! 在内存中挂载弹窗、回放输入，并收集控制器发出的全部指令。

use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, bail};
use serde_json::Value;
use tracing::{debug, warn};
use videos_modal::link::ATTRIBUTE_PREFIX;
use videos_modal::{
    LinkAttributes, ModalCommand, ModalOptions, ModalState, ModalView, Provider,
    StaticConsentGate, VideosModal, Viewport,
};

use crate::script::Step;

/// 读取实例配置，未给出路径时使用内置默认值
pub fn load_options(path: Option<&Path>) -> anyhow::Result<ModalOptions> {
    let Some(path) = path else {
        return Ok(ModalOptions::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
    ModalOptions::from_json(&json).with_context(|| format!("配置文件无效: {}", path.display()))
}

/// 读取触发链接列表
pub fn load_links(path: &Path) -> anyhow::Result<Vec<LinkAttributes>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("无法读取链接文件: {}", path.display()))?;
    parse_links(&json).with_context(|| format!("链接文件无效: {}", path.display()))
}

/// 解析链接列表
///
/// 每个链接是一个对象，键可以写完整属性名，也可以省略 `data-videos-modal-` 前缀。
pub fn parse_links(json: &str) -> anyhow::Result<Vec<LinkAttributes>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        bail!("链接列表必须是数组");
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                bail!("第 {index} 个链接必须是对象");
            };
            Ok(fields
                .iter()
                .map(|(key, value)| (attribute_name(key), attribute_value(value)))
                .collect::<LinkAttributes>())
        })
        .collect()
}

fn attribute_name(key: &str) -> String {
    if key.starts_with(ATTRIBUTE_PREFIX) {
        key.to_string()
    } else {
        format!("{ATTRIBUTE_PREFIX}{key}")
    }
}

/// 按 DOM `setAttribute` 的字符串化规则写入
fn attribute_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 由允许/拒绝列表构造网关，两者都为空时不配置网关
pub fn consent_gate(allow: &[Provider], deny: &[Provider]) -> Option<StaticConsentGate> {
    if allow.is_empty() && deny.is_empty() {
        return None;
    }
    let gate = allow
        .iter()
        .map(|p| (p, true))
        .chain(deny.iter().map(|p| (p, false)))
        .fold(StaticConsentGate::new(), |gate, (provider, allowed)| {
            gate.with_state(provider.clone(), allowed)
        });
    Some(gate)
}

/// 一次预览会话
pub struct Preview {
    modal: VideosModal,
    view: ModalView,
    gate: Option<Rc<StaticConsentGate>>,
    links: Vec<LinkAttributes>,
    viewport: Viewport,
    commands: Vec<ModalCommand>,
}

impl Preview {
    /// 创建控制器并挂载
    pub fn new(
        options: ModalOptions,
        links: Vec<LinkAttributes>,
        gate: Option<StaticConsentGate>,
        viewport: Viewport,
    ) -> Self {
        let gate = gate.map(Rc::new);
        let mut modal = VideosModal::new(options);
        if let Some(gate) = &gate {
            modal = modal.with_consent_gate(gate.clone());
        }

        let mut preview = Self {
            modal,
            view: ModalView::new(),
            gate,
            links,
            viewport,
            commands: Vec::new(),
        };
        let commands = preview.modal.mount(preview.links.clone());
        preview.record(commands);
        preview
    }

    /// 按顺序执行脚本
    pub fn run(&mut self, steps: &[Step]) -> anyhow::Result<()> {
        for (n, step) in steps.iter().enumerate() {
            let commands = match step {
                Step::Input(input) => self
                    .modal
                    .handle(input.clone(), self.viewport)
                    .with_context(|| format!("第 {n} 步 `{step}` 失败"))?,
                Step::Reset => self.modal.reset(self.links.clone()),
            };
            debug!(step = %step, count = commands.len(), "执行步骤");
            self.record(commands);
        }
        Ok(())
    }

    fn record(&mut self, commands: Vec<ModalCommand>) {
        self.view
            .apply_all(&commands, self.modal.consent_gate());
        self.commands.extend(commands);
        if !self.view.is_consistent_with(self.modal.state()) {
            warn!("视图与控制器状态不一致");
        }
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    pub fn state(&self) -> &ModalState {
        self.modal.state()
    }

    /// 至今发出的全部指令
    pub fn commands(&self) -> &[ModalCommand] {
        &self.commands
    }

    /// 同意网关打开面板的次数
    pub fn panel_openings(&self) -> usize {
        self.gate.as_ref().map_or(0, |gate| gate.panel_openings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use videos_modal::VideoParam;

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_parse_links_accepts_short_keys() {
        let links = parse_links(
            r#"[
                {"provider": "vimeo", "id": 76979871},
                {"data-videos-modal-mp4": "a.mp4", "autoplay": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].param(VideoParam::Id), Some("76979871"));
        assert_eq!(links[1].param(VideoParam::Mp4), Some("a.mp4"));
        assert_eq!(links[1].param(VideoParam::Autoplay), Some("true"));
    }

    #[test]
    fn test_parse_links_rejects_non_objects() {
        assert!(parse_links(r#"{"provider": "vimeo"}"#).is_err());
        assert!(parse_links(r#"["vimeo"]"#).is_err());
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();

        let options_path = dir.path().join("options.json");
        let mut file = fs::File::create(&options_path).unwrap();
        write!(file, r#"{{"navigate": false, "videos_provider": "youtube"}}"#).unwrap();
        let options = load_options(Some(&options_path)).unwrap();
        assert!(!options.navigate);

        let links_path = dir.path().join("links.json");
        fs::write(&links_path, r#"[{"id": "abc"}, {}]"#).unwrap();
        let links = load_links(&links_path).unwrap();
        assert_eq!(links.len(), 2);

        assert!(load_links(&dir.path().join("missing.json")).is_err());
        assert!(load_options(None).unwrap().navigate);
    }

    #[test]
    fn test_invalid_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"links": ""}"#).unwrap();
        assert!(load_options(Some(&path)).is_err());
    }

    #[test]
    fn test_no_gate_without_lists() {
        assert!(consent_gate(&[], &[]).is_none());
        assert!(consent_gate(&[Provider::YouTube], &[]).is_some());
    }

    #[test]
    fn test_preview_run() {
        let links = parse_links(r#"[{"provider": "youtube"}, {"provider": "vimeo"}, {"mp4": "c.mp4"}]"#)
            .unwrap();
        let gate = consent_gate(&[Provider::YouTube], &[Provider::Vimeo]);
        let mut preview = Preview::new(ModalOptions::default(), links, gate, VIEWPORT);

        preview.run(&parse_script("open:0,prev").unwrap()).unwrap();
        assert_eq!(preview.state().current_link, 2);
        let player = preview.view().player().unwrap();
        assert_eq!(player.attribute("src"), None);
        assert_eq!(player.sources[0].src, "c.mp4");

        preview.run(&parse_script("prev").unwrap()).unwrap();
        assert!(!preview.state().is_open());
        assert_eq!(preview.panel_openings(), 1);
        assert!(preview.view().is_consistent_with(preview.state()));
    }

    #[test]
    fn test_preview_reports_failing_step() {
        let links = parse_links(r#"[{}]"#).unwrap();
        let mut preview = Preview::new(ModalOptions::default(), links, None, VIEWPORT);
        let error = preview.run(&parse_script("next").unwrap()).unwrap_err();
        assert!(error.to_string().contains("第 0 步"));
    }
}
