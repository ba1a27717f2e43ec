use std::ffi::{CStr, CString};

use libc::c_char;

#[repr(transparent)]
pub struct FfiBool(u32);

#[csharp_ffi] pub unsafe extern "C" fn log(msg: *const c_char) {
    let _ = CStr::from_ptr(msg);
}

#[csharp_ffi] pub unsafe extern "C" fn string_free(s: *mut c_char) {
    let _ = CString::from_raw(s);
}

#[csharp_ffi] pub extern "C" fn client_new() -> *mut Client {
    Box::into_raw(Box::new(Client::default()))
}

#[csharp_ffi] pub unsafe extern "C" fn client_free(client: *mut Client) {
    let _ = Box::from_raw(client);
}

#[csharp_ffi] pub unsafe extern "C" fn client_num_players(client: *const Client) -> u8 {
    (*client).players
}

// exported, not bound yet
#[csharp_ffi] pub unsafe extern "C" fn client_set_room_password(client: *mut Client, pw: *const c_char) {
    let _ = (client, pw);
}

pub extern "C" fn internal_callback() {}
