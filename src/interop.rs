#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::actions::StorefrontChatAction;
use crate::config::ResponderConfig;
use crate::error::{ResponderError, Result};
use crate::providers::{FeaturedProductsProvider, ProviderContext};
use crate::reflection::reflect;
use crate::sessions::ResponderPool;

/// Conversation used when the host does not send one.
pub const DEFAULT_CONVERSATION: &str = "default";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub language: String,
    pub interop_protocols: Vec<String>,
    pub actions: Vec<ActionManifest>,
    pub providers: Vec<ProviderManifest>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionManifest {
    pub name: String,
    pub description: String,
    pub similes: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderManifest {
    pub name: String,
    pub description: String,
}

impl Default for PluginManifest {
    fn default() -> Self {
        let action = StorefrontChatAction;
        let provider = FeaturedProductsProvider;
        Self {
            name: "storefront-chat".to_string(),
            description: "Scripted shopping assistant with product suggestions - no LLM required"
                .to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            language: "rust".to_string(),
            interop_protocols: vec!["ffi".to_string(), "ipc".to_string()],
            actions: vec![ActionManifest {
                name: action.name().to_string(),
                description: action.description().to_string(),
                similes: action.similes().into_iter().map(String::from).collect(),
            }],
            providers: vec![ProviderManifest {
                name: provider.name().to_string(),
                description: provider.description().to_string(),
            }],
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl ActionResult {
    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.to_string()),
            data: None,
        }
    }
}

impl From<crate::actions::ActionResult> for ActionResult {
    fn from(result: crate::actions::ActionResult) -> Self {
        let data = result.data.and_then(|v| match v {
            serde_json::Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        });
        Self {
            success: result.success,
            text: result.text,
            error: result.error,
            data,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

lazy_static::lazy_static! {
    static ref PLUGIN_POOL: Mutex<Arc<ResponderPool>> = Mutex::new(Arc::new(ResponderPool::default()));
}

fn current_pool() -> Arc<ResponderPool> {
    let guard = PLUGIN_POOL.lock().unwrap_or_else(|e| e.into_inner());
    Arc::clone(&guard)
}

pub fn get_manifest_json() -> String {
    serde_json::to_string(&PluginManifest::default())
        .unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Replaces the shared pool. Existing conversations are dropped.
pub fn init_plugin(config_json: &str) -> Result<()> {
    let trimmed = config_json.trim();
    let config = if trimmed.is_empty() || trimmed == "null" || trimmed == "{}" {
        ResponderConfig::default()
    } else {
        ResponderConfig::from_json(trimmed)?
    };
    info!(?config, "Initializing storefront chat plugin");
    let mut guard = PLUGIN_POOL.lock().unwrap_or_else(|e| e.into_inner());
    *guard = Arc::new(ResponderPool::new(config));
    Ok(())
}

pub fn validate_action(name: &str, _memory_json: &str, _state_json: &str) -> bool {
    name == StorefrontChatAction.name()
}

pub fn invoke_action(
    name: &str,
    memory_json: &str,
    _state_json: &str,
    options_json: &str,
) -> ActionResult {
    if name != StorefrontChatAction.name() {
        return ActionResult::failure(&ResponderError::UnknownAction(name.to_string()).to_string());
    }

    let request = extract_request(memory_json, options_json);
    let session = current_pool().session(&request.conversation_id);
    StorefrontChatAction
        .handler_for(&session, &request.input)
        .into()
}

pub fn get_provider(name: &str, memory_json: &str, _state_json: &str) -> ProviderResult {
    let provider = FeaturedProductsProvider;
    if name != provider.name() {
        warn!(name, "Unknown provider requested");
        return ProviderResult::default();
    }
    let room_id = serde_json::from_str::<serde_json::Value>(memory_json)
        .ok()
        .and_then(|m| m.get("roomId").and_then(|v| v.as_str()).map(String::from));
    let result = provider.get(&ProviderContext { room_id });
    ProviderResult {
        text: Some(result.text),
        values: Some(result.values),
        data: Some(result.data),
    }
}

/// Forgets a conversation's counters and cursors. Returns whether it existed.
pub fn end_session(conversation_id: &str) -> bool {
    current_pool().end_session(conversation_id)
}

struct ChatRequest {
    input: String,
    conversation_id: String,
}

fn extract_request(memory_json: &str, options_json: &str) -> ChatRequest {
    let options = serde_json::from_str::<serde_json::Value>(options_json).ok();
    let memory = serde_json::from_str::<serde_json::Value>(memory_json).ok();

    let input = options
        .as_ref()
        .and_then(|o| {
            ["input", "prompt", "text"]
                .iter()
                .find_map(|key| o.get(*key).and_then(|v| v.as_str()))
        })
        .or_else(|| {
            memory
                .as_ref()
                .and_then(|m| m.get("content"))
                .and_then(|c| c.get("text"))
                .and_then(|v| v.as_str())
        })
        .unwrap_or_default()
        .to_string();

    let conversation_id = options
        .as_ref()
        .and_then(|o| o.get("conversationId"))
        .or_else(|| memory.as_ref().and_then(|m| m.get("roomId")))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_CONVERSATION)
        .to_string();

    ChatRequest {
        input,
        conversation_id,
    }
}

#[cfg(feature = "ffi")]
pub mod ffi {
    use super::*;
    use std::ffi::{CStr, CString};
    use std::os::raw::{c_char, c_int};

    fn cstr_to_string(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
    }

    fn string_to_cstr(s: String) -> *mut c_char {
        match CString::new(s) {
            Ok(cs) => cs.into_raw(),
            Err(_) => std::ptr::null_mut(),
        }
    }

    #[no_mangle]
    pub extern "C" fn elizaos_get_manifest() -> *mut c_char {
        string_to_cstr(get_manifest_json())
    }

    #[no_mangle]
    pub extern "C" fn elizaos_init(config_json: *const c_char) -> c_int {
        let config = cstr_to_string(config_json).unwrap_or_default();
        match init_plugin(&config) {
            Ok(()) => 0,
            Err(_) => -1,
        }
    }

    #[no_mangle]
    pub extern "C" fn elizaos_validate_action(
        name: *const c_char,
        memory_json: *const c_char,
        state_json: *const c_char,
    ) -> c_int {
        let name = match cstr_to_string(name) {
            Some(s) => s,
            None => return 0,
        };
        let memory = cstr_to_string(memory_json).unwrap_or_default();
        let state = cstr_to_string(state_json).unwrap_or_default();

        if validate_action(&name, &memory, &state) {
            1
        } else {
            0
        }
    }

    #[no_mangle]
    pub extern "C" fn elizaos_invoke_action(
        name: *const c_char,
        memory_json: *const c_char,
        state_json: *const c_char,
        options_json: *const c_char,
    ) -> *mut c_char {
        let name = match cstr_to_string(name) {
            Some(s) => s,
            None => {
                return string_to_cstr(r#"{"success": false, "error": "Invalid name"}"#.to_string())
            }
        };
        let memory = cstr_to_string(memory_json).unwrap_or_default();
        let state = cstr_to_string(state_json).unwrap_or_default();
        let options = cstr_to_string(options_json).unwrap_or_else(|| "{}".to_string());

        let result = invoke_action(&name, &memory, &state, &options);
        string_to_cstr(
            serde_json::to_string(&result)
                .unwrap_or_else(|e| format!(r#"{{"success": false, "error": "{}"}}"#, e)),
        )
    }

    #[no_mangle]
    pub extern "C" fn elizaos_get_provider(
        name: *const c_char,
        memory_json: *const c_char,
        state_json: *const c_char,
    ) -> *mut c_char {
        let name = match cstr_to_string(name) {
            Some(s) => s,
            None => return string_to_cstr("{}".to_string()),
        };
        let memory = cstr_to_string(memory_json).unwrap_or_default();
        let state = cstr_to_string(state_json).unwrap_or_default();

        let result = get_provider(&name, &memory, &state);
        string_to_cstr(serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string()))
    }

    /// Returns 1 if the conversation existed and was dropped, 0 otherwise.
    #[no_mangle]
    pub extern "C" fn elizaos_end_session(conversation_id: *const c_char) -> c_int {
        match cstr_to_string(conversation_id) {
            Some(id) if end_session(&id) => 1,
            _ => 0,
        }
    }

    #[no_mangle]
    pub extern "C" fn storefront_respond(input: *const c_char) -> *mut c_char {
        let input = cstr_to_string(input).unwrap_or_default();
        let reply = crate::responder::respond(&input);
        string_to_cstr(serde_json::to_string(&reply).unwrap_or_else(|_| "{}".to_string()))
    }

    #[no_mangle]
    pub extern "C" fn storefront_reflect(text: *const c_char) -> *mut c_char {
        let text = cstr_to_string(text).unwrap_or_default();
        string_to_cstr(reflect(&text))
    }

    /// Frees a string that was allocated and returned by this library.
    ///
    /// # Safety
    ///
    /// - `ptr` must have been returned by one of the functions in this module.
    /// - `ptr` must not have been previously freed.
    /// - The string must not be accessed after this call.
    #[no_mangle]
    pub unsafe extern "C" fn elizaos_free_string(ptr: *mut c_char) {
        if !ptr.is_null() {
            let _ = CString::from_raw(ptr);
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcRequest {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcResponse {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IpcResponse {
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: u64, error: &str) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.to_string()),
        }
    }

    fn from_serializable<T: Serialize>(id: u64, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::success(id, v),
            Err(e) => Self::error(id, &e.to_string()),
        }
    }
}

fn param_str<'a>(params: &'a serde_json::Value, key: &str) -> &'a str {
    params.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn param_json(params: &serde_json::Value, key: &str, default: &str) -> String {
    params
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}

pub fn handle_ipc_request(request: &IpcRequest) -> IpcResponse {
    let params = &request.params;
    match request.method.as_str() {
        "getManifest" => IpcResponse::from_serializable(request.id, &PluginManifest::default()),
        "init" => match init_plugin(&param_json(params, "config", "{}")) {
            Ok(()) => IpcResponse::success(request.id, serde_json::json!({"initialized": true})),
            Err(e) => IpcResponse::error(request.id, &e.to_string()),
        },
        "validateAction" => {
            let valid = validate_action(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
            );
            IpcResponse::success(request.id, serde_json::json!({"valid": valid}))
        }
        "invokeAction" => {
            let result = invoke_action(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
                &param_json(params, "options", "{}"),
            );
            IpcResponse::from_serializable(request.id, &result)
        }
        "getProvider" => {
            let result = get_provider(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
            );
            IpcResponse::from_serializable(request.id, &result)
        }
        "respond" => {
            let conversation = params
                .get("conversationId")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_CONVERSATION);
            let reply = current_pool().respond(conversation, param_str(params, "input"));
            IpcResponse::from_serializable(request.id, &reply)
        }
        "endSession" => {
            let conversation = params
                .get("conversationId")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_CONVERSATION);
            let ended = end_session(conversation);
            IpcResponse::success(request.id, serde_json::json!({"ended": ended}))
        }
        "reflect" => {
            let reflected = reflect(param_str(params, "text"));
            IpcResponse::success(request.id, serde_json::json!({"reflected": reflected}))
        }
        _ => IpcResponse::error(request.id, &format!("Unknown method: {}", request.method)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EMPTY_PROMPT;

    lazy_static::lazy_static! {
        // Tests that add or count sessions in the shared pool run one at a time.
        static ref POOL_TESTS: Mutex<()> = Mutex::new(());
    }

    fn pool_guard() -> std::sync::MutexGuard<'static, ()> {
        POOL_TESTS.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_manifest() {
        let manifest = PluginManifest::default();
        assert_eq!(manifest.name, "storefront-chat");
        assert_eq!(manifest.actions.len(), 1);
        assert_eq!(manifest.actions[0].name, "storefront-chat");
        assert_eq!(manifest.providers[0].name, "featured-products");
    }

    #[test]
    fn test_validate_action() {
        assert!(validate_action("storefront-chat", "{}", "{}"));
        assert!(!validate_action("unknown-action", "{}", "{}"));
    }

    #[test]
    fn test_invoke_action() {
        let _guard = pool_guard();
        let result = invoke_action(
            "storefront-chat",
            "{}",
            "{}",
            r#"{"input": "hello", "conversationId": "interop-invoke"}"#,
        );
        assert!(result.success);
        assert!(result.text.is_some());
    }

    #[test]
    fn test_invoke_action_reads_memory() {
        let _guard = pool_guard();
        let result = invoke_action(
            "storefront-chat",
            r#"{"roomId": "interop-memory", "content": {"text": "where is my order"}}"#,
            "{}",
            "{}",
        );
        assert!(result.success);
    }

    #[test]
    fn test_invoke_unknown_action() {
        let result = invoke_action("nope", "{}", "{}", "{}");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("nope"));
    }

    #[test]
    fn test_invoke_action_blank_input_gets_prompt() {
        let _guard = pool_guard();
        for options in ["{}", r#"{"input": "   ", "conversationId": "interop-blank"}"#] {
            let result = invoke_action("storefront-chat", "{}", "{}", options);
            assert!(result.success);
            assert_eq!(result.text.as_deref(), Some(DEFAULT_EMPTY_PROMPT));
            assert!(result.error.is_none());
            assert!(result.data.is_none());
        }
    }

    #[test]
    fn test_get_provider() {
        let result = get_provider("featured-products", "{}", "{}");
        assert!(result.text.unwrap().contains("Featured products"));
        assert!(get_provider("missing", "{}", "{}").text.is_none());
    }

    #[test]
    fn test_get_provider_reads_room() {
        let result = get_provider("featured-products", r#"{"roomId": "room-42"}"#, "{}");
        assert_eq!(result.values.unwrap()["roomId"], "room-42");
    }

    #[test]
    fn test_ipc_end_session() {
        let _guard = pool_guard();
        let pool = current_pool();
        for id in ["ipc-end-a", "ipc-end-b"] {
            let request = IpcRequest {
                id: 4,
                method: "respond".to_string(),
                params: serde_json::json!({"input": "hello", "conversationId": id}),
            };
            assert!(handle_ipc_request(&request).error.is_none());
        }
        assert!(pool.contains("ipc-end-a"));

        let end = |id: u64| {
            handle_ipc_request(&IpcRequest {
                id,
                method: "endSession".to_string(),
                params: serde_json::json!({"conversationId": "ipc-end-a"}),
            })
        };
        let before = pool.session_count();
        assert_eq!(end(5).result.unwrap()["ended"], true);
        assert_eq!(pool.session_count(), before - 1);
        assert!(!pool.contains("ipc-end-a"));
        assert!(pool.contains("ipc-end-b"));
        assert_eq!(end(6).result.unwrap()["ended"], false);
    }

    #[test]
    fn test_ipc_respond() {
        let _guard = pool_guard();
        let request = IpcRequest {
            id: 1,
            method: "respond".to_string(),
            params: serde_json::json!({"input": "I need a new cable", "conversationId": "ipc-test"}),
        };
        let response = handle_ipc_request(&request);
        assert!(response.error.is_none());
        let text = response.result.unwrap()["text"].as_str().unwrap().to_string();
        assert!(!text.is_empty());
    }

    #[test]
    fn test_ipc_reflect() {
        let request = IpcRequest {
            id: 2,
            method: "reflect".to_string(),
            params: serde_json::json!({"text": "my cart"}),
        };
        let response = handle_ipc_request(&request);
        assert_eq!(response.result.unwrap()["reflected"], "your cart");
    }

    #[test]
    fn test_ipc_unknown_method() {
        let request = IpcRequest {
            id: 3,
            method: "dance".to_string(),
            params: serde_json::Value::Null,
        };
        assert!(handle_ipc_request(&request).error.is_some());
    }

    #[test]
    fn test_init_rejects_bad_config() {
        assert!(init_plugin(r#"{"suggestionInterval": 0}"#).is_err());
    }
}
