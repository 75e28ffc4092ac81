// Android ClipboardManager access through JNI
// Reference: https://developer.android.com/reference/android/content/ClipboardManager
//
// has_text()  -> hasPrimaryClip()
// get_text()  -> getPrimaryClip().getItemAt(0).getText()

use jni::objects::{JObject, JValue};

use jni::JNIEnv;

fn jni_err(what: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, e))
}

/// Resolve `Context.getSystemService(CLIPBOARD_SERVICE)` for the current activity.
fn clipboard_manager<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'local>,
) -> std::io::Result<Option<JObject<'local>>> {
    let context_class = env
        .find_class("android/content/Context")
        .map_err(|e| jni_err("Failed to find Context class", e))?;

    let service_name = env
        .get_static_field(&context_class, "CLIPBOARD_SERVICE", "Ljava/lang/String;")
        .and_then(|v| v.l())
        .map_err(|e| jni_err("Failed to get CLIPBOARD_SERVICE", e))?;

    let manager = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&service_name)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err("Failed to call getSystemService", e))?;

    if manager.is_null() {
        return Ok(None);
    }
    Ok(Some(manager))
}

fn with_clipboard<T>(
    f: impl for<'local> FnOnce(&mut JNIEnv<'local>, Option<JObject<'local>>) -> std::io::Result<T>,
) -> std::io::Result<T> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm() as _) }.map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Expected to find JVM via ndk_context crate",
        )
    })?;

    let activity = unsafe { JObject::from_raw(ctx.context() as _) };
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("Failed to attach current thread", e))?;

    let manager = clipboard_manager(&mut *env, &activity)?;
    f(&mut *env, manager)
}

/// Check whether the primary clip is set
pub fn has_text() -> std::io::Result<bool> {
    with_clipboard(|env, manager| {
        let Some(manager) = manager else {
            return Ok(false);
        };
        env.call_method(&manager, "hasPrimaryClip", "()Z", &[])
            .and_then(|v| v.z())
            .map_err(|e| jni_err("Failed to call hasPrimaryClip", e))
    })
}

/// Text of the first clip item, `None` when the clipboard is empty or holds no text
pub fn get_text() -> std::io::Result<Option<String>> {
    with_clipboard(|env, manager| {
        let Some(manager) = manager else {
            return Ok(None);
        };

        let clip = env
            .call_method(&manager, "getPrimaryClip", "()Landroid/content/ClipData;", &[])
            .and_then(|v| v.l())
            .map_err(|e| jni_err("Failed to call getPrimaryClip", e))?;
        if clip.is_null() {
            return Ok(None);
        }

        let item_count = env
            .call_method(&clip, "getItemCount", "()I", &[])
            .and_then(|v| v.i())
            .map_err(|e| jni_err("Failed to call getItemCount", e))?;
        if item_count == 0 {
            return Ok(None);
        }

        let item = env
            .call_method(
                &clip,
                "getItemAt",
                "(I)Landroid/content/ClipData$Item;",
                &[JValue::Int(0)],
            )
            .and_then(|v| v.l())
            .map_err(|e| jni_err("Failed to call getItemAt", e))?;
        if item.is_null() {
            return Ok(None);
        }

        let text = env
            .call_method(&item, "getText", "()Ljava/lang/CharSequence;", &[])
            .and_then(|v| v.l())
            .map_err(|e| jni_err("Failed to call getText", e))?;
        if text.is_null() {
            return Ok(None);
        }

        let text = env
            .call_method(&text, "toString", "()Ljava/lang/String;", &[])
            .and_then(|v| v.l())
            .map_err(|e| jni_err("Failed to call toString", e))?;

        let result: String = env
            .get_string(&jni::objects::JString::from(text))
            .map_err(|e| jni_err("Failed to convert to Rust string", e))?
            .into();

        Ok(Some(result))
    })
}
