use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::driver::{AutomationDriver, Element, SwipeDirection};
use crate::locator::locator::Locator;
use crate::page::error::PageError;

/// W3C key under which element references are returned.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// JSON body sent to the Appium server.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DriverRequest {
    NewSession {
        capabilities: Capabilities,
    },
    Timeouts {
        implicit: u64,
    },
    FindElements {
        using: &'static str,
        value: String,
    },
    SendKeys {
        text: String,
    },
    Actions {
        actions: Vec<PointerSequence>,
    },
    Empty {},
}

#[derive(Debug, Serialize)]
pub struct Capabilities {
    #[serde(rename = "alwaysMatch")]
    pub always_match: Value,
}

#[derive(Debug, Serialize)]
pub struct PointerSequence {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'static str,
    pub parameters: PointerParameters,
    pub actions: Vec<PointerAction>,
}

#[derive(Debug, Serialize)]
pub struct PointerParameters {
    #[serde(rename = "pointerType")]
    pub pointer_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PointerAction {
    #[serde(rename = "pointerMove")]
    Move { duration: u64, x: i64, y: i64 },
    #[serde(rename = "pointerDown")]
    Down { button: u8 },
    #[serde(rename = "pause")]
    Pause { duration: u64 },
    #[serde(rename = "pointerUp")]
    Up { button: u8 },
}

impl DriverRequest {
    pub fn new_session(capabilities: Value) -> Self {
        DriverRequest::NewSession {
            capabilities: Capabilities {
                always_match: capabilities,
            },
        }
    }

    pub fn implicit_wait(timeout: Duration) -> Self {
        DriverRequest::Timeouts {
            implicit: timeout.as_millis() as u64,
        }
    }

    pub fn find_elements(locator: &Locator) -> Self {
        DriverRequest::FindElements {
            using: locator.strategy(),
            value: locator.value(),
        }
    }

    pub fn send_keys(text: &str) -> Self {
        DriverRequest::SendKeys {
            text: text.to_string(),
        }
    }

    /// Single-finger drag from 75% to 25% of `rect` height (or the reverse).
    pub fn swipe(direction: SwipeDirection, rect: &Rect) -> Self {
        let x = (rect.x + rect.width / 2.0) as i64;
        let low = (rect.y + rect.height * 0.75) as i64;
        let high = (rect.y + rect.height * 0.25) as i64;
        let (from, to) = match direction {
            SwipeDirection::Up => (low, high),
            SwipeDirection::Down => (high, low),
        };
        DriverRequest::Actions {
            actions: vec![PointerSequence {
                kind: "pointer",
                id: "finger1",
                parameters: PointerParameters {
                    pointer_type: "touch",
                },
                actions: vec![
                    PointerAction::Move { duration: 0, x, y: from },
                    PointerAction::Down { button: 0 },
                    PointerAction::Pause { duration: 200 },
                    PointerAction::Move { duration: 600, x, y: to },
                    PointerAction::Up { button: 0 },
                ],
            }],
        }
    }
}

/// Response envelope returned by the Appium server.
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    #[serde(default)]
    pub value: Value,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

impl DriverResponse {
    /// WebDriver error payloads carry `value.error` plus `value.message`.
    pub fn error(&self) -> Option<String> {
        let error = self.value.get("error")?.as_str()?;
        let message = self
            .value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("");
        Some(format!("{}: {}", error, message))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf", alias = "ELEMENT")]
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A live Appium session speaking W3C WebDriver JSON over HTTP.
pub struct AppiumSession {
    client: Client,
    base_url: String,
    session_id: String,
    closed: bool,
}

impl AppiumSession {
    /// Create a session on `server_url` with the given capabilities.
    pub fn start(server_url: &str, capabilities: Value) -> Result<Self, PageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| PageError::Http {
                command: "client".into(),
                source: e,
            })?;
        let base_url = server_url.trim_end_matches('/').to_string();

        let response = execute(
            &client,
            Method::POST,
            &format!("{}/session", base_url),
            Some(&DriverRequest::new_session(capabilities)),
            "new_session",
        )?;

        let session_id = response
            .session_id
            .or_else(|| {
                response
                    .value
                    .get("sessionId")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
            })
            .ok_or_else(|| PageError::DriverProtocol {
                command: "new_session".into(),
                error: "No sessionId in new session response".into(),
            })?;

        Ok(AppiumSession {
            client,
            base_url,
            session_id,
            closed: false,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&DriverRequest>,
        command: &str,
    ) -> Result<DriverResponse, PageError> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        execute(&self.client, method, &url, body, command)
    }

    fn element_rect(&self, element: Option<&Element>) -> Result<Rect, PageError> {
        let (path, command) = match element {
            Some(el) => (format!("/element/{}/rect", el.id), "element_rect"),
            None => ("/window/rect".to_string(), "window_rect"),
        };
        let response = self.send(Method::GET, &path, None, command)?;
        serde_json::from_value(response.value).map_err(|e| PageError::JsonParse {
            context: command.into(),
            source: e,
        })
    }

    /// End the session. Errors are ignored; the server may already be gone.
    pub fn quit(&mut self) -> Result<(), PageError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let _ = self.send(Method::DELETE, "", None, "quit");
        Ok(())
    }
}

impl AutomationDriver for AppiumSession {
    fn set_implicit_wait(&mut self, timeout: Duration) -> Result<(), PageError> {
        self.send(
            Method::POST,
            "/timeouts",
            Some(&DriverRequest::implicit_wait(timeout)),
            "timeouts",
        )?;
        Ok(())
    }

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<Element>, PageError> {
        let response = self.send(
            Method::POST,
            "/elements",
            Some(&DriverRequest::find_elements(locator)),
            "find_elements",
        )?;
        let refs: Vec<ElementRef> =
            serde_json::from_value(response.value).map_err(|e| PageError::JsonParse {
                context: "find_elements response".into(),
                source: e,
            })?;
        Ok(refs.into_iter().map(|r| Element::new(r.id)).collect())
    }

    fn click(&mut self, element: &Element) -> Result<(), PageError> {
        self.send(
            Method::POST,
            &format!("/element/{}/click", element.id),
            Some(&DriverRequest::Empty {}),
            "click",
        )?;
        Ok(())
    }

    fn text(&mut self, element: &Element) -> Result<String, PageError> {
        let response = self.send(
            Method::GET,
            &format!("/element/{}/text", element.id),
            None,
            "text",
        )?;
        Ok(response.value.as_str().unwrap_or("").to_string())
    }

    fn attribute(&mut self, element: &Element, key: &str) -> Result<Option<String>, PageError> {
        let response = self.send(
            Method::GET,
            &format!("/element/{}/attribute/{}", element.id, key),
            None,
            "attribute",
        )?;
        Ok(response.value.as_str().map(|s| s.to_string()))
    }

    fn clear(&mut self, element: &Element) -> Result<(), PageError> {
        self.send(
            Method::POST,
            &format!("/element/{}/clear", element.id),
            Some(&DriverRequest::Empty {}),
            "clear",
        )?;
        Ok(())
    }

    fn send_keys(&mut self, element: &Element, text: &str) -> Result<(), PageError> {
        self.send(
            Method::POST,
            &format!("/element/{}/value", element.id),
            Some(&DriverRequest::send_keys(text)),
            "send_keys",
        )?;
        Ok(())
    }

    fn is_keyboard_shown(&mut self) -> Result<bool, PageError> {
        let response = self.send(
            Method::GET,
            "/appium/device/is_keyboard_shown",
            None,
            "is_keyboard_shown",
        )?;
        Ok(response.value.as_bool().unwrap_or(false))
    }

    fn hide_keyboard(&mut self) -> Result<(), PageError> {
        self.send(
            Method::POST,
            "/appium/device/hide_keyboard",
            Some(&DriverRequest::Empty {}),
            "hide_keyboard",
        )?;
        Ok(())
    }

    fn swipe(&mut self, direction: SwipeDirection, within: Option<&Element>) -> Result<(), PageError> {
        let rect = self.element_rect(within)?;
        self.send(
            Method::POST,
            "/actions",
            Some(&DriverRequest::swipe(direction, &rect)),
            "actions",
        )?;
        Ok(())
    }
}

impl Drop for AppiumSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

fn execute(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&DriverRequest>,
    command: &str,
) -> Result<DriverResponse, PageError> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().map_err(|e| PageError::Http {
        command: command.into(),
        source: e,
    })?;

    let response: DriverResponse = response.json().map_err(|e| PageError::Http {
        command: command.into(),
        source: e,
    })?;

    if let Some(error) = response.error() {
        return Err(PageError::DriverProtocol {
            command: command.into(),
            error,
        });
    }

    Ok(response)
}
