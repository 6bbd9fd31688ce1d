//! Python snippets handed to Blender via `--python-expr`
//!
//! Scripts read their file arguments from `sys.argv` after `--`; paths are
//! never spliced into the generated code.

use asset_viz_common::ModelFormat;

const PRELUDE: &str = r#"import bpy
import json
import math
import sys

argv = sys.argv[sys.argv.index("--") + 1:]

def reset_scene():
    bpy.ops.object.select_all(action='SELECT')
    bpy.ops.object.delete()
    for blocks in (bpy.data.meshes, bpy.data.materials, bpy.data.textures, bpy.data.images):
        for block in list(blocks):
            if block.users == 0:
                blocks.remove(block)

reset_scene()
"#;

const PLACE_FN: &str = r#"
with open(argv[0]) as handle:
    placements = json.load(handle)

def place(index):
    data = placements.get(str(index))
    if not data:
        return
    position = data.get("position")
    rotation = data.get("rotation")
    scale = data.get("scale")
    if isinstance(scale, (int, float)):
        scale = (scale, scale, scale)
    for obj in bpy.context.selected_objects:
        if isinstance(position, list) and len(position) == 3:
            obj.location = position
        if isinstance(rotation, list) and len(rotation) == 3:
            obj.rotation_euler = [math.radians(v) for v in rotation]
        if isinstance(scale, (list, tuple)) and len(scale) == 3:
            obj.scale = scale
"#;

const ANIMATION_REPORT: &str = r#"
animations = []
for action in bpy.data.actions:
    start, end = action.frame_range
    affected = set()
    for fcurve in action.fcurves:
        if "pose.bones" in fcurve.data_path:
            affected.add("Bone: " + fcurve.data_path.split('"')[1])
        else:
            affected.add("Object animation")
    animations.append({
        "name": action.name,
        "duration_frames": end - start,
        "affected_elements": sorted(affected),
    })

with open(argv[1], "w") as handle:
    json.dump({"supports_animation": True, "animations": animations}, handle)
"#;

/// Import statement for `format`, reading the path from the Python expression `path`
#[must_use]
pub fn import_call(format: ModelFormat, path: &str) -> String {
    match format {
        ModelFormat::Obj => format!("bpy.ops.import_scene.obj(filepath={path})\n"),
        ModelFormat::Fbx => format!("bpy.ops.import_scene.fbx(filepath={path})\n"),
        ModelFormat::Stl => format!("bpy.ops.import_mesh.stl(filepath={path})\n"),
        ModelFormat::Collada => format!("bpy.ops.wm.collada_import(filepath={path})\n"),
        ModelFormat::Gltf => format!("bpy.ops.import_scene.gltf(filepath={path})\n"),
        ModelFormat::Blend => format!(
            "with bpy.data.libraries.load({path}) as (data_from, data_to):\n    \
             data_to.objects = data_from.objects\n\
             for obj in data_to.objects:\n    \
             if obj is not None:\n        \
             bpy.context.collection.objects.link(obj)\n"
        ),
    }
}

fn export_call(path: &str) -> String {
    format!(
        "bpy.ops.export_scene.gltf(filepath={path}, export_format='GLB', \
         export_texcoords=True, export_normals=True, export_materials=True, \
         export_animations=True)\n"
    )
}

/// `argv`: input, output
#[must_use]
pub fn convert_script(format: ModelFormat) -> String {
    let mut script = String::from(PRELUDE);
    script.push_str(&import_call(format, "argv[0]"));
    script.push_str(&export_call("argv[1]"));
    script
}

/// `argv`: placements json, output, then one path per entry of `formats`
#[must_use]
pub fn combine_script(formats: &[ModelFormat]) -> String {
    let mut script = String::from(PRELUDE);
    script.push_str(PLACE_FN);
    for (index, format) in formats.iter().enumerate() {
        script.push_str(
            "\nbpy.ops.object.select_all(action='DESELECT')\n\
             before = set(bpy.context.scene.objects)\n",
        );
        script.push_str(&import_call(*format, &format!("argv[{}]", index + 2)));
        script.push_str(&format!(
            "for obj in bpy.context.scene.objects:\n    \
             obj.select_set(obj not in before)\n\
             place({index})\n"
        ));
    }
    script.push_str(&export_call("argv[1]"));
    script
}

/// `argv`: model, report json
#[must_use]
pub fn animation_script() -> String {
    let mut script = String::from(PRELUDE);
    script.push_str(&import_call(ModelFormat::Gltf, "argv[0]"));
    script.push_str(ANIMATION_REPORT);
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_call_per_format() {
        assert_eq!(
            import_call(ModelFormat::Obj, "p"),
            "bpy.ops.import_scene.obj(filepath=p)\n"
        );
        assert!(import_call(ModelFormat::Fbx, "p").starts_with("bpy.ops.import_scene.fbx("));
        assert!(import_call(ModelFormat::Stl, "p").starts_with("bpy.ops.import_mesh.stl("));
        assert!(import_call(ModelFormat::Collada, "p").starts_with("bpy.ops.wm.collada_import("));
        assert!(import_call(ModelFormat::Gltf, "p").starts_with("bpy.ops.import_scene.gltf("));
        assert!(import_call(ModelFormat::Blend, "p").contains("bpy.data.libraries.load(p)"));
    }

    #[test]
    fn test_convert_script_reads_paths_from_argv() {
        let script = convert_script(ModelFormat::Fbx);
        assert!(script.contains("bpy.ops.import_scene.fbx(filepath=argv[0])"));
        assert!(script.contains("bpy.ops.export_scene.gltf(filepath=argv[1], export_format='GLB'"));
        assert!(script.contains("export_animations=True"));
    }

    #[test]
    fn test_place_guards_component_arity() {
        let script = combine_script(&[ModelFormat::Fbx]);
        assert!(script.contains("isinstance(position, list) and len(position) == 3"));
        assert!(script.contains("isinstance(rotation, list) and len(rotation) == 3"));
        assert!(script.contains("len(scale) == 3"));
    }

    #[test]
    fn test_combine_script_places_each_model() {
        let script = combine_script(&[ModelFormat::Gltf, ModelFormat::Obj]);
        assert!(script.contains("bpy.ops.import_scene.gltf(filepath=argv[2])"));
        assert!(script.contains("bpy.ops.import_scene.obj(filepath=argv[3])"));
        assert!(script.contains("place(0)"));
        assert!(script.contains("place(1)"));
        assert!(!script.contains("place(2)"));
        assert!(script.contains("export_animations=True"));
    }

    #[test]
    fn test_blend_import_is_valid_block() {
        let call = import_call(ModelFormat::Blend, "argv[2]");
        let lines: Vec<&str> = call.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("    data_to.objects"));
        assert!(lines[4].starts_with("        bpy.context.collection"));
    }

    #[test]
    fn test_animation_script_writes_report() {
        let script = animation_script();
        assert!(script.contains("import_scene.gltf(filepath=argv[0])"));
        assert!(script.contains("open(argv[1], \"w\")"));
    }
}
