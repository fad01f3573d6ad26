//! Manifest template sources
//!
//! Rendered with `trim_blocks` and `lstrip_blocks`, so block tags may sit on
//! their own indented lines without leaving blank lines behind.

/// One ConfigMap per hook category, keyed by script name
pub const CONFIG_MAP: &str = r"apiVersion: v1
kind: ConfigMap
metadata:
  name: {{ project_name }}-{{ container_name }}-config-{{ hook }}
  namespace: {{ namespace }}
data:{{ ' {}' if not scripts else '' }}
{% for script in scripts %}
  {{ script.name }}: |
  {% for line in script.lines %}
    {{ line }}
  {% endfor %}
{% endfor %}
";

/// Pod spec fragment: service account plus one volume per category
pub const SERVICE_ACCOUNT_NAME_VOLUMES: &str = r"serviceAccountName: {{ project_name }}-full-access-service-account
volumes:
{% for entry in hooks %}
  - name: {{ project_name }}-{{ container_name }}-config-{{ entry.hook }}-volume
    configMap:
      name: {{ project_name }}-{{ container_name }}-config-{{ entry.hook }}
      defaultMode: 0744
      items:{{ ' []' if not entry.scripts else '' }}
  {% for script in entry.scripts %}
        - key: {{ script.name }}
          path: {{ script.name }}
  {% endfor %}
{% endfor %}
";

/// Container spec fragment: one mount per category
pub const VOLUME_MOUNTS: &str = r"volumeMounts:
{% for mount in mounts %}
  - mountPath: {{ mount.path }}
    name: {{ project_name }}-{{ container_name }}-config-{{ mount.hook }}-volume
{% endfor %}
";

/// Service account with full access to the namespace
pub const ACCOUNTS: &str = r#"apiVersion: v1
kind: ServiceAccount
metadata:
  name: {{ project_name }}-full-access-service-account
  namespace: {{ namespace }}
---
kind: Role
apiVersion: rbac.authorization.k8s.io/v1beta1
metadata:
  name: {{ project_name }}-full-access-role
  namespace: {{ namespace }}
rules:
  - apiGroups: ["", "extensions", "apps"]
    resources: ["*"]
    verbs: ["*"]
  - apiGroups: ["batch"]
    resources:
      - jobs
      - cronjobs
    verbs: ["*"]
---
kind: RoleBinding
apiVersion: rbac.authorization.k8s.io/v1beta1
metadata:
  name: {{ project_name }}-full-access-role-binding
  namespace: {{ namespace }}
subjects:
  - kind: ServiceAccount
    name: {{ project_name }}-full-access-service-account
    namespace: {{ namespace }}
roleRef:
  apiGroup: rbac.authorization.k8s.io
  kind: Role
  name: {{ project_name }}-full-access-role
"#;
