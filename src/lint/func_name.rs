use crate::ast::FuncDecl;

/// The canonical name a span is expected to carry: `Name` for plain
/// functions, `(ReceiverType).Name` for methods, with a `*` prefix on the
/// receiver type when it is a pointer.
pub fn full_func_name(func: &FuncDecl) -> String {
	match &func.receiver {
		None => func.name.clone(),
		Some(recv) => {
			let ptr = if recv.pointer { "*" } else { "" };
			format!("({ptr}{}).{}", recv.type_name, func.name)
		}
	}
}
