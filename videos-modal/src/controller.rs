//! # Controller 模块
//!
//! 弹窗控制器：拥有弹窗生命周期、触发链接集合与 [`ModalState`]。
//!
//! ## 执行模型
//!
//! ```text
//! handle(input, viewport) -> Vec<ModalCommand>
//! ```
//!
//! 1. 根据输入与当前状态决定操作（open / close / prev / next）
//! 2. 调用 [`Resolver`] 计算参数，构造可播放元素描述
//! 3. 更新状态，返回 Host 需要按顺序执行的指令
//!
//! 控制器只向同意网关查询允许状态；激活与打开面板以指令形式交给 Host。

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::command::{Direction, ModalCommand, NavigationLink};
use crate::consent::ConsentGate;
use crate::error::{ModalError, ModalResult};
use crate::input::{Key, ModalInput};
use crate::layout::Viewport;
use crate::link::LinkAttributes;
use crate::options::ModalOptions;
use crate::provider::Provider;
use crate::resolver::Resolver;
use crate::state::{ModalState, next_index, prev_index};
use crate::template::{PlayerElement, PlayerKind, build_player};

/// 视频弹窗控制器
pub struct VideosModal {
    /// 实例配置
    options: ModalOptions,
    /// 可选的同意网关
    consent_gate: Option<Rc<dyn ConsentGate>>,
    /// 按文档顺序排列的触发链接
    links: Vec<LinkAttributes>,
    /// 弹窗状态
    state: ModalState,
}

impl VideosModal {
    /// 创建控制器
    ///
    /// 不产生任何指令，调用 [`VideosModal::mount`] 挂载弹窗并注册链接。
    pub fn new(options: ModalOptions) -> Self {
        Self {
            options,
            consent_gate: None,
            links: Vec::new(),
            state: ModalState::new(),
        }
    }

    /// 设置同意网关
    pub fn with_consent_gate(mut self, gate: Rc<dyn ConsentGate>) -> Self {
        self.consent_gate = Some(gate);
        self
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn links(&self) -> &[LinkAttributes] {
        &self.links
    }

    pub fn consent_gate(&self) -> Option<&dyn ConsentGate> {
        self.consent_gate.as_deref()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.options)
    }

    /// 挂载弹窗容器并注册触发链接
    pub fn mount(&mut self, links: Vec<LinkAttributes>) -> Vec<ModalCommand> {
        let mut commands = vec![ModalCommand::MountContainer {
            close_icon: self.options.close_icon().map(str::to_string),
            loader_icon: self.options.loader_icon().map(str::to_string),
            only_landscape: self.options.only_landscape,
            close_by_icon: self.options.close_by_icon,
            close_on_click: self.options.close_on_click,
        }];
        commands.extend(self.register_links(links));
        commands
    }

    /// 注册触发链接
    ///
    /// 启用导航且链接多于一个时，按文档顺序写入从 0 开始的顺序索引。
    pub fn register_links(&mut self, links: Vec<LinkAttributes>) -> Vec<ModalCommand> {
        self.links = links;
        self.state.current_link = 0;

        let with_order = self.navigation_enabled();
        let mut commands = Vec::with_capacity(self.links.len() * 2);
        for (index, link) in self.links.iter_mut().enumerate() {
            if with_order {
                link.set_order(index);
                commands.push(ModalCommand::SetLinkOrder {
                    index,
                    order: index,
                });
            }
            commands.push(ModalCommand::BindLink { index });
        }

        debug!(count = self.links.len(), navigate = with_order, "注册触发链接");
        commands
    }

    /// 文档中的触发链接变化后重新注册
    ///
    /// 先解绑所有已注册链接，再按相同配置重新注册；
    /// 不重建弹窗容器，也不重复绑定窗口级监听。打开状态下先关闭弹窗。
    pub fn reset(&mut self, links: Vec<LinkAttributes>) -> Vec<ModalCommand> {
        let mut commands = self.close();
        commands.extend((0..self.links.len()).map(|index| ModalCommand::UnbindLink { index }));
        commands.extend(self.register_links(links));
        commands
    }

    /// 处理一个输入事件
    pub fn handle(
        &mut self,
        input: ModalInput,
        viewport: Viewport,
    ) -> ModalResult<Vec<ModalCommand>> {
        match input {
            ModalInput::LinkClicked { index } => self.open(index, viewport),
            ModalInput::PrevClicked => self.prev(viewport),
            ModalInput::NextClicked => self.next(viewport),
            ModalInput::CloseIconClicked if self.options.close_by_icon => Ok(self.close()),
            ModalInput::BackgroundClicked if self.options.close_on_click => Ok(self.close()),
            ModalInput::CloseIconClicked | ModalInput::BackgroundClicked => Ok(Vec::new()),
            ModalInput::KeyDown(key) => self.handle_key(key, viewport),
        }
    }

    fn handle_key(&mut self, key: Key, viewport: Viewport) -> ModalResult<Vec<ModalCommand>> {
        if !self.state.is_open() {
            return Ok(Vec::new());
        }
        match key {
            Key::Escape if self.options.close_with_escape => Ok(self.close()),
            Key::ArrowLeft if self.navigation_enabled() => self.prev(viewport),
            Key::ArrowRight if self.navigation_enabled() => self.next(viewport),
            _ => Ok(Vec::new()),
        }
    }

    /// 打开第 `index` 个触发链接
    ///
    /// 同意网关禁止该 Provider 时只打开网关面板，不修改弹窗。
    pub fn open(&mut self, index: usize, viewport: Viewport) -> ModalResult<Vec<ModalCommand>> {
        let link = self.link(index)?;
        let provider = self.resolver().resolve_provider(link);

        if self.consent_blocks(&provider) {
            info!(provider = %provider, "Provider 未获同意，打开同意面板");
            return Ok(vec![ModalCommand::OpenConsentPanel]);
        }

        let player = self.build_player(link, viewport);
        let current = link.order().unwrap_or(index);

        let mut commands = self.close();
        self.state.open();
        self.state.current_link = current;
        commands.push(ModalCommand::ShowModal);
        commands.push(ModalCommand::InsertPlayer(player));
        if self.consent_activates(&provider) {
            commands.push(ModalCommand::ActivateConsent {
                provider: provider.clone(),
            });
        }

        if self.navigation_enabled() {
            let (prev, next) = self.neighbour_attributes();
            commands.push(ModalCommand::InsertNavigation {
                prev: NavigationLink {
                    direction: Direction::Prev,
                    icon: self.options.left_arrow().map(str::to_string),
                    attributes: prev,
                },
                next: NavigationLink {
                    direction: Direction::Next,
                    icon: self.options.right_arrow().map(str::to_string),
                    attributes: next,
                },
            });
            self.state.has_navigation_controls = true;
        }

        debug!(index, current, provider = %provider, "打开视频弹窗");
        Ok(commands)
    }

    /// 关闭弹窗
    ///
    /// 已关闭时不产生任何指令。
    pub fn close(&mut self) -> Vec<ModalCommand> {
        if !self.state.is_open() {
            return Vec::new();
        }

        let had_navigation = self.state.has_navigation_controls;
        self.state.close();

        let mut commands = vec![ModalCommand::HideModal, ModalCommand::RemovePlayer];
        if had_navigation {
            commands.push(ModalCommand::RemoveNavigation);
        }
        debug!("关闭视频弹窗");
        commands
    }

    /// 切换到上一个视频
    pub fn prev(&mut self, viewport: Viewport) -> ModalResult<Vec<ModalCommand>> {
        self.ensure_navigation()?;
        let target = prev_index(self.state.current_link, self.links.len());
        Ok(self.update_navigation_links(target, viewport))
    }

    /// 切换到下一个视频
    pub fn next(&mut self, viewport: Viewport) -> ModalResult<Vec<ModalCommand>> {
        self.ensure_navigation()?;
        let target = next_index(self.state.current_link, self.links.len());
        Ok(self.update_navigation_links(target, viewport))
    }

    /// 切换到 `target` 并改写导航链接
    ///
    /// 同意网关禁止新 Provider 时关闭弹窗并打开网关面板。
    fn update_navigation_links(&mut self, target: usize, viewport: Viewport) -> Vec<ModalCommand> {
        let link = &self.links[target];
        let provider = self.resolver().resolve_provider(link);

        if self.consent_blocks(&provider) {
            info!(provider = %provider, "Provider 未获同意，关闭弹窗并打开同意面板");
            let mut commands = self.close();
            commands.push(ModalCommand::OpenConsentPanel);
            return commands;
        }

        let player = self.build_player(link, viewport);
        self.state.current_link = link.order().unwrap_or(target);

        let (prev, next) = self.neighbour_attributes();
        let mut commands = vec![
            ModalCommand::RemovePlayer,
            ModalCommand::UpdateNavigation { prev, next },
            ModalCommand::InsertPlayer(player),
        ];
        if self.consent_activates(&provider) {
            commands.push(ModalCommand::ActivateConsent {
                provider: provider.clone(),
            });
        }

        debug!(current = self.state.current_link, provider = %provider, "切换视频");
        commands
    }

    /// 为某个链接构造可播放元素
    pub fn build_player(&self, link: &LinkAttributes, viewport: Viewport) -> PlayerElement {
        let params = self.resolver().resolve(link, viewport);
        let kind = PlayerKind::for_provider(&params.provider, self.consent_gate.is_some());
        build_player(&params, kind, viewport, self.options.only_landscape)
    }

    /// 是否生成导航链接
    pub fn navigation_enabled(&self) -> bool {
        self.options.navigate && self.links.len() > 1
    }

    fn link(&self, index: usize) -> ModalResult<&LinkAttributes> {
        self.links.get(index).ok_or(ModalError::LinkNotFound {
            index,
            count: self.links.len(),
        })
    }

    fn ensure_navigation(&self) -> ModalResult<()> {
        if self.state.is_open() && self.state.has_navigation_controls {
            Ok(())
        } else {
            warn!("弹窗未打开或没有导航链接，忽略导航");
            Err(ModalError::NavigationUnavailable)
        }
    }

    /// 当前链接前后两个链接的属性副本
    fn neighbour_attributes(&self) -> (LinkAttributes, LinkAttributes) {
        let count = self.links.len();
        let current = self.state.current_link % count;
        let resolver = self.resolver();
        (
            resolver.clone_attributes(&self.links[prev_index(current, count)]),
            resolver.clone_attributes(&self.links[next_index(current, count)]),
        )
    }

    /// 网关存在且未允许该 Provider（本地媒体不受网关管理）
    fn consent_blocks(&self, provider: &Provider) -> bool {
        match &self.consent_gate {
            Some(gate) => !provider.is_media() && !gate.is_allowed(provider),
            None => false,
        }
    }

    /// 网关存在且已允许该受支持的 Provider
    fn consent_activates(&self, provider: &Provider) -> bool {
        match &self.consent_gate {
            Some(gate) => provider.is_supported() && gate.is_allowed(provider),
            None => false,
        }
    }
}
