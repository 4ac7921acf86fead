//! tarteaucitron 同意网关适配

use js_sys::{Function, Reflect};
use tracing::warn;
use videos_modal::{ConsentGate, Provider};
use wasm_bindgen::{JsCast, JsValue};

/// 包装页面上的 tarteaucitron 对象
///
/// 只用到 `state[tag]`、`services[tag].js()` 与 `userInterface.openPanel()`。
pub(crate) struct JsConsentGate {
    tarteaucitron: JsValue,
}

impl JsConsentGate {
    pub(crate) fn new(tarteaucitron: JsValue) -> Self {
        Self { tarteaucitron }
    }

    /// 调用 `object[path[0]][path[1]]...[method]()`，`this` 为方法所属对象
    fn call(&self, path: &[&str], method: &str) -> Result<(), JsValue> {
        let mut target = self.tarteaucitron.clone();
        for key in path {
            target = Reflect::get(&target, &JsValue::from_str(key))?;
        }
        let function: Function = Reflect::get(&target, &JsValue::from_str(method))?.dyn_into()?;
        function.call0(&target)?;
        Ok(())
    }
}

impl ConsentGate for JsConsentGate {
    fn is_allowed(&self, provider: &Provider) -> bool {
        if !provider.is_supported() {
            return false;
        }
        Reflect::get(&self.tarteaucitron, &JsValue::from_str("state"))
            .and_then(|state| Reflect::get(&state, &JsValue::from_str(provider.tag())))
            .map(|allowed| allowed.is_truthy())
            .unwrap_or(false)
    }

    fn activate(&self, provider: &Provider) {
        if let Err(error) = self.call(&["services", provider.tag()], "js") {
            warn!(provider = %provider, ?error, "激活同意网关服务失败");
        }
    }

    fn open_panel(&self) {
        if let Err(error) = self.call(&["userInterface"], "openPanel") {
            warn!(?error, "打开同意面板失败");
        }
    }
}
