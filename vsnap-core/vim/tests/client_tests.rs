//! VI/JSON 客户端集成测试 (mockito 模拟 vCenter)

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use vsnap_vim::*;

const BASE: &str = "/sdk/vim25/8.0.1.0";
const SESSION: &str = "5f8a7c0e-session";

fn service_content() -> String {
    json!({
        "_typeName": "ServiceContent",
        "about": { "fullName": "VMware vCenter Server 8.0.1", "apiVersion": "8.0.1.0" },
        "searchIndex": { "_typeName": "ManagedObjectReference", "type": "SearchIndex", "value": "SearchIndex" },
        "sessionManager": { "_typeName": "ManagedObjectReference", "type": "SessionManager", "value": "SessionManager" }
    })
    .to_string()
}

async fn logged_in_client(server: &mut ServerGuard) -> (VimClient, Vec<Mock>) {
    let content = server
        .mock("GET", format!("{}/ServiceInstance/ServiceInstance/content", BASE).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(service_content())
        .create_async()
        .await;
    let login = server
        .mock("POST", format!("{}/SessionManager/SessionManager/Login", BASE).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header(SESSION_HEADER, SESSION)
        .with_body(json!({ "key": "52a1", "userName": "VSPHERE.LOCAL\\Administrator" }).to_string())
        .create_async()
        .await;

    let client = VimClient::new(&server.url(), VimConfig::default()).unwrap();
    client.login("administrator@vsphere.local", "secret").await.unwrap();
    (client, vec![content, login])
}

#[tokio::test]
async fn test_login_stores_session_key() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    assert!(client.is_logged_in().await);
    assert_eq!(client.session_key().await.unwrap(), SESSION);
    assert_eq!(
        client.service_content().await.unwrap().session_manager.value,
        "SessionManager"
    );
}

#[tokio::test]
async fn test_login_sends_credentials() {
    let mut server = Server::new_async().await;
    let _content = server
        .mock("GET", format!("{}/ServiceInstance/ServiceInstance/content", BASE).as_str())
        .with_status(200)
        .with_body(service_content())
        .create_async()
        .await;
    let login = server
        .mock("POST", format!("{}/SessionManager/SessionManager/Login", BASE).as_str())
        .match_body(Matcher::Json(json!({
            "userName": "root",
            "password": "hunter2"
        })))
        .with_status(200)
        .with_header(SESSION_HEADER, SESSION)
        .with_body(json!({ "key": "1", "userName": "root" }).to_string())
        .create_async()
        .await;

    let client = VimClient::new(&server.url(), VimConfig::default()).unwrap();
    let session = client.login("root", "hunter2").await.unwrap();
    assert_eq!(session.user_name, "root");
    login.assert_async().await;
}

#[tokio::test]
async fn test_invalid_login_is_fault() {
    let mut server = Server::new_async().await;
    let _content = server
        .mock("GET", format!("{}/ServiceInstance/ServiceInstance/content", BASE).as_str())
        .with_status(200)
        .with_body(service_content())
        .create_async()
        .await;
    let _login = server
        .mock("POST", format!("{}/SessionManager/SessionManager/Login", BASE).as_str())
        .with_status(500)
        .with_body(json!({
            "_typeName": "InvalidLogin",
            "faultMessage": [{ "key": "InvalidLogin", "message": "Cannot complete login due to an incorrect user name or password." }]
        }).to_string())
        .create_async()
        .await;

    let client = VimClient::new(&server.url(), VimConfig::default()).unwrap();
    let err = client.login("root", "wrong").await.unwrap_err();
    assert!(!err.is_io());
    assert!(matches!(err, VimError::Fault { ref type_name, .. } if type_name == "InvalidLogin"));
    assert!(!client.is_logged_in().await);
}

#[tokio::test]
async fn test_login_without_session_header_fails() {
    let mut server = Server::new_async().await;
    let _content = server
        .mock("GET", format!("{}/ServiceInstance/ServiceInstance/content", BASE).as_str())
        .with_status(200)
        .with_body(service_content())
        .create_async()
        .await;
    let _login = server
        .mock("POST", format!("{}/SessionManager/SessionManager/Login", BASE).as_str())
        .with_status(200)
        .with_body(json!({ "key": "1", "userName": "root" }).to_string())
        .create_async()
        .await;

    let client = VimClient::new(&server.url(), VimConfig::default()).unwrap();
    let err = client.login("root", "pw").await.unwrap_err();
    assert!(matches!(err, VimError::AuthError(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_io_error() {
    // 端口 9 (discard) 上没有服务
    let client = VimClient::new("http://127.0.0.1:9", VimConfig::default()).unwrap();
    let err = client.login("root", "pw").await.unwrap_err();
    assert!(err.is_io(), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_find_by_uuid_found() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let find = server
        .mock("POST", format!("{}/SearchIndex/SearchIndex/FindByUuid", BASE).as_str())
        .match_header(SESSION_HEADER, SESSION)
        .match_body(Matcher::Json(json!({
            "uuid": "4229a4c1-7d2b-41d2-b0a2-1c3f0e3c5a10",
            "vmSearch": true,
            "instanceUuid": true
        })))
        .with_status(200)
        .with_body(json!({ "_typeName": "ManagedObjectReference", "type": "VirtualMachine", "value": "vm-42" }).to_string())
        .create_async()
        .await;

    let vm = client
        .search_index()
        .find_by_uuid("4229a4c1-7d2b-41d2-b0a2-1c3f0e3c5a10", true)
        .await
        .unwrap();
    assert_eq!(vm, Some(ManagedObjectReference::new("VirtualMachine", "vm-42")));
    find.assert_async().await;
}

#[tokio::test]
async fn test_find_by_uuid_missing_returns_none() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let _find = server
        .mock("POST", format!("{}/SearchIndex/SearchIndex/FindByUuid", BASE).as_str())
        .with_status(204)
        .create_async()
        .await;

    let vm = client.search_index().find_by_uuid("nope", false).await.unwrap();
    assert!(vm.is_none());
}

#[tokio::test]
async fn test_create_snapshot_returns_task() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let create = server
        .mock("POST", format!("{}/VirtualMachine/vm-42/CreateSnapshot_Task", BASE).as_str())
        .match_header(SESSION_HEADER, SESSION)
        .match_body(Matcher::Json(json!({
            "name": "before-upgrade",
            "memory": false,
            "quiesce": true
        })))
        .with_status(200)
        .with_body(json!({ "_typeName": "ManagedObjectReference", "type": "Task", "value": "task-1001" }).to_string())
        .create_async()
        .await;

    let vm = ManagedObjectReference::new("VirtualMachine", "vm-42");
    let req = CreateSnapshotRequest {
        name: "before-upgrade".into(),
        description: None,
        memory: false,
        quiesce: true,
    };
    let task = client.virtual_machine().create_snapshot(&vm, &req).await.unwrap();
    assert_eq!(task.kind, "Task");
    assert_eq!(task.value, "task-1001");
    create.assert_async().await;
}

#[tokio::test]
async fn test_task_state() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let _task = server
        .mock("GET", format!("{}/Task/task-1001/info", BASE).as_str())
        .with_status(200)
        .with_body(json!({ "_typeName": "TaskInfo", "key": "task-1001", "state": "success" }).to_string())
        .create_async()
        .await;

    let task = ManagedObjectReference::new("Task", "task-1001");
    assert_eq!(client.task().state(&task).await.unwrap(), TaskInfoState::Success);
}

#[tokio::test]
async fn test_snapshot_null_is_none() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let _vm = server
        .mock("GET", format!("{}/VirtualMachine/vm-42/snapshot", BASE).as_str())
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let vm = ManagedObjectReference::new("VirtualMachine", "vm-42");
    assert!(client.virtual_machine().snapshot(&vm).await.unwrap().is_none());
}

#[tokio::test]
async fn test_snapshot_tree() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let _vm = server
        .mock("GET", format!("{}/VirtualMachine/vm-42/snapshot", BASE).as_str())
        .with_status(200)
        .with_body(json!({
            "_typeName": "VirtualMachineSnapshotInfo",
            "rootSnapshotList": [{
                "name": "A",
                "description": "first",
                "childSnapshotList": [{ "name": "B", "description": "second", "childSnapshotList": [] }]
            }]
        }).to_string())
        .create_async()
        .await;

    let vm = ManagedObjectReference::new("VirtualMachine", "vm-42");
    let info = client.virtual_machine().snapshot(&vm).await.unwrap().unwrap();
    assert_eq!(info.root_snapshot_list[0].child_snapshot_list[0].description, "second");
}

#[tokio::test]
async fn test_managed_object_not_found_fault() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let _task = server
        .mock("GET", format!("{}/Task/task-9/info", BASE).as_str())
        .with_status(500)
        .with_body(json!({ "_typeName": "ManagedObjectNotFound" }).to_string())
        .create_async()
        .await;

    let task = ManagedObjectReference::new("Task", "task-9");
    let err = client.task().info(&task).await.unwrap_err();
    assert!(matches!(err, VimError::Fault { ref type_name, .. } if type_name == "ManagedObjectNotFound"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mut server = Server::new_async().await;
    let (client, _session) = logged_in_client(&mut server).await;

    let logout = server
        .mock("POST", format!("{}/SessionManager/SessionManager/Logout", BASE).as_str())
        .match_header(SESSION_HEADER, SESSION)
        .with_status(204)
        .create_async()
        .await;

    client.logout().await.unwrap();
    assert!(!client.is_logged_in().await);
    logout.assert_async().await;
}
